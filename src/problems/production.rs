//! Production planning.
//!
//! A workshop builds two products. Product A earns 40 and product B earns
//! 30 per unit. A needs 2 hours of labor and 1 unit of material, B needs 1
//! hour and 2 units. 100 labor hours and 80 units of material are
//! available. Only whole units can be sold. How many of each should be
//! built?
//!
//! ```text
//! maximize    sum_p profit[p] * n[p]
//! subject to  sum_p usage[r][p] * n[p] <= capacity[r]   for each resource r
//!             0 <= n[p] <= min_r capacity[r] / usage[r][p]   integer
//! ```

use crate::constraints::ConstraintExt;
use crate::error::Result;
use crate::expr::{dot, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

#[derive(Debug, Clone)]
pub struct Product {
    pub name: &'static str,
    pub profit: f64,
    /// Usage per unit, in the order of `Production::resources`.
    pub usage: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Production {
    pub products: Vec<Product>,
    /// Resource names with available capacity.
    pub resources: Vec<(&'static str, f64)>,
}

impl Default for Production {
    fn default() -> Self {
        Production {
            products: vec![
                Product {
                    name: "A",
                    profit: 40.0,
                    usage: vec![2.0, 1.0],
                },
                Product {
                    name: "B",
                    profit: 30.0,
                    usage: vec![1.0, 2.0],
                },
            ],
            resources: vec![("labor", 100.0), ("material", 80.0)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductionVars {
    pub units: Vec<Variable>,
}

impl Production {
    /// Most units of `product` any single resource allows.
    ///
    /// Infinite when the product uses no resource at all.
    pub fn max_units(&self, product: &Product) -> f64 {
        self.resources
            .iter()
            .zip(&product.usage)
            .filter(|(_, usage)| **usage > 0.0)
            .map(|((_, capacity), usage)| (capacity / usage).floor())
            .fold(f64::INFINITY, f64::min)
    }

    /// Units built of each product.
    pub fn plan(&self, vars: &ProductionVars, solution: &Solution) -> Result<Vec<i64>> {
        Ok(solution
            .values(&vars.units)?
            .into_iter()
            .map(|x| x.round() as i64)
            .collect())
    }
}

impl Formulation for Production {
    const NAME: &'static str = "production";
    const BACKEND: &'static str = "CBC";
    type Handles = ProductionVars;

    fn formulate(&self) -> Result<(Model, ProductionVars)> {
        for product in &self.products {
            check_len(
                format_args!("usage of {}", product.name),
                product.usage.len(),
                self.resources.len(),
            )?;
        }
        let mut model = Model::new(Self::NAME);
        let units: Vec<Variable> = self
            .products
            .iter()
            .map(|p| model.int_var(0.0, self.max_units(p), p.name))
            .collect();

        for (r, (resource, capacity)) in self.resources.iter().enumerate() {
            let usage: Vec<f64> = self.products.iter().map(|p| p.usage[r]).collect();
            model.add_constraint(dot(&usage, &units).leq(*capacity).named(*resource));
        }

        let profit: Vec<f64> = self.products.iter().map(|p| p.profit).collect();
        model.maximize(dot(&profit, &units));
        Ok((model, ProductionVars { units }))
    }

    fn report(&self, vars: &ProductionVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Production", solution).objective_label("Profit");
        let plan = self.plan(vars, solution)?;
        for (product, n) in self.products.iter().zip(&plan) {
            report.line(format!("{} = {}", product.name, n));
        }
        for (r, (resource, capacity)) in self.resources.iter().enumerate() {
            let used: f64 = self
                .products
                .iter()
                .zip(&plan)
                .map(|(p, n)| p.usage[r] * *n as f64)
                .sum();
            report.line(format!("{resource}: {used} of {capacity} used"));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormularyError;
    use crate::problems::{run, solve};

    #[test]
    fn test_best_mix() {
        let problem = Production::default();
        let solved = solve(&problem).expect("solve failed");
        let profit = solved.solution.objective_value().expect("no value");
        assert!((profit - 2200.0).abs() < 1e-6);
        assert_eq!(
            problem.plan(&solved.handles, &solved.solution).expect("values"),
            vec![40, 20]
        );
    }

    #[test]
    fn test_integrality_binds() {
        // LP optimum would be fractional at (39.33, 21.33).
        let mut problem = Production::default();
        problem.resources[0].1 = 100.0;
        problem.resources[1].1 = 82.0;
        let solved = solve(&problem).expect("solve failed");
        let plan = problem
            .plan(&solved.handles, &solved.solution)
            .expect("values");
        assert!(2 * plan[0] + plan[1] <= 100);
        assert!(plan[0] + 2 * plan[1] <= 82);

        let mut best = 0;
        for a in 0..=50 {
            for b in 0..=41 {
                if 2 * a + b <= 100 && a + 2 * b <= 82 {
                    best = best.max(40 * a + 30 * b);
                }
            }
        }
        assert_eq!(40 * plan[0] + 30 * plan[1], best);
    }

    #[test]
    fn test_units_bounded_by_scarcest_resource() {
        let problem = Production::default();
        assert_eq!(problem.max_units(&problem.products[0]), 50.0);
        assert_eq!(problem.max_units(&problem.products[1]), 40.0);

        let (model, vars) = problem.formulate().expect("formulate");
        let b = model.variable(vars.units[1]).expect("declared");
        assert_eq!((b.lower, b.upper), (0.0, 40.0));
    }

    #[test]
    fn test_usage_shape_checked() {
        let mut problem = Production::default();
        problem.products[1].usage.pop();
        assert!(matches!(
            problem.formulate(),
            Err(FormularyError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_report_lists_units() {
        let text = run(&Production::default()).expect("run failed").to_string();
        assert!(text.contains("A = 40"));
        assert!(text.contains("B = 20"));
        assert!(text.contains("Profit = 2200.0000"));
    }
}

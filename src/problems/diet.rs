//! Diet problem.
//!
//! Polly wants a daily diet with at least 2000 kcal of energy, 55 g of
//! protein and 800 mg of calcium, built from six foods with limited
//! servings per day. What is the cheapest diet?
//!
//! ```text
//! minimize    sum_f cost[f] * x[f]
//! subject to  sum_f content[n][f] * x[f] >= minimum[n]   for each nutrient n
//!             0 <= x[f] <= max_servings[f]                for each food f
//! ```

use crate::constraints::ConstraintExt;
use crate::error::Result;
use crate::expr::{dot, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

/// A food with its price and nutrient content per serving.
#[derive(Debug, Clone)]
pub struct Food {
    pub name: &'static str,
    /// Cents per serving.
    pub cost: f64,
    pub max_servings: f64,
    /// Content per serving, in the order of `Diet::nutrients`.
    pub content: Vec<f64>,
}

/// A nutrient with a daily minimum.
#[derive(Debug, Clone)]
pub struct Nutrient {
    pub name: &'static str,
    pub minimum: f64,
}

#[derive(Debug, Clone)]
pub struct Diet {
    pub foods: Vec<Food>,
    pub nutrients: Vec<Nutrient>,
}

impl Default for Diet {
    fn default() -> Self {
        let food = |name, cost, max_servings, content: [f64; 3]| Food {
            name,
            cost,
            max_servings,
            content: content.to_vec(),
        };
        Diet {
            foods: vec![
                food("oatmeal", 3.0, 4.0, [110.0, 4.0, 2.0]),
                food("chicken", 24.0, 3.0, [205.0, 32.0, 12.0]),
                food("eggs", 13.0, 2.0, [160.0, 13.0, 54.0]),
                food("milk", 9.0, 8.0, [160.0, 8.0, 285.0]),
                food("cherry pie", 20.0, 2.0, [420.0, 4.0, 22.0]),
                food("pork with beans", 19.0, 2.0, [260.0, 14.0, 80.0]),
            ],
            nutrients: vec![
                Nutrient {
                    name: "energy (kcal)",
                    minimum: 2000.0,
                },
                Nutrient {
                    name: "protein (g)",
                    minimum: 55.0,
                },
                Nutrient {
                    name: "calcium (mg)",
                    minimum: 800.0,
                },
            ],
        }
    }
}

/// Servings per food.
#[derive(Debug, Clone)]
pub struct DietVars {
    pub servings: Vec<Variable>,
}

impl Diet {
    /// Servings of each food in the solution.
    pub fn servings(&self, vars: &DietVars, solution: &Solution) -> Result<Vec<f64>> {
        solution.values(&vars.servings)
    }
}

impl Formulation for Diet {
    const NAME: &'static str = "diet";
    const BACKEND: &'static str = "GLOP";
    type Handles = DietVars;

    fn formulate(&self) -> Result<(Model, DietVars)> {
        for food in &self.foods {
            check_len(
                format_args!("content of {}", food.name),
                food.content.len(),
                self.nutrients.len(),
            )?;
        }
        let mut model = Model::new(Self::NAME);
        let servings: Vec<Variable> = self
            .foods
            .iter()
            .map(|f| model.num_var(0.0, f.max_servings, f.name))
            .collect();

        for (n, nutrient) in self.nutrients.iter().enumerate() {
            let content: Vec<f64> = self.foods.iter().map(|f| f.content[n]).collect();
            model.add_constraint(
                dot(&content, &servings)
                    .geq(nutrient.minimum)
                    .named(nutrient.name),
            );
        }

        let costs: Vec<f64> = self.foods.iter().map(|f| f.cost).collect();
        model.minimize(dot(&costs, &servings));

        Ok((model, DietVars { servings }))
    }

    fn report(&self, vars: &DietVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Diet", solution).objective_label("Daily cost (cents)");
        let servings = self.servings(vars, solution)?;
        for (food, x) in self.foods.iter().zip(&servings) {
            if *x > 1e-6 {
                report.line(format!("{:<16} {:>7.3} servings", food.name, x));
            }
        }
        for (n, nutrient) in self.nutrients.iter().enumerate() {
            let total: f64 = self
                .foods
                .iter()
                .zip(&servings)
                .map(|(f, x)| f.content[n] * x)
                .sum();
            report.line(format!(
                "{:<16} {:>7.1} (min {})",
                nutrient.name, total, nutrient.minimum
            ));
        }
        Ok(report)
    }
}

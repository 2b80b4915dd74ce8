//! Transportation problem.
//!
//! Two canneries ship cases to three markets. Each cannery has a limited
//! supply, each market an exact demand, and freight costs 90 dollars per
//! case per thousand miles. Find the cheapest shipping plan.
//!
//! ```text
//! minimize    sum_ij cost[i][j] * x[i][j]
//! subject to  sum_j x[i][j] <= supply[i]
//!             sum_i x[i][j]  = demand[j]
//!             x[i][j] >= 0
//! ```

use crate::constraints::ConstraintExt;
use crate::error::Result;
use crate::expr::{sum, LinExpr, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

#[derive(Debug, Clone)]
pub struct Transportation {
    pub plants: Vec<(&'static str, f64)>,
    pub markets: Vec<(&'static str, f64)>,
    /// Distance in thousands of miles, `distance[plant][market]`.
    pub distance: Vec<Vec<f64>>,
    /// Dollars per case per thousand miles.
    pub freight: f64,
}

impl Default for Transportation {
    fn default() -> Self {
        Transportation {
            plants: vec![("seattle", 350.0), ("san-diego", 600.0)],
            markets: vec![("new-york", 325.0), ("chicago", 300.0), ("topeka", 275.0)],
            distance: vec![vec![2.5, 1.7, 1.8], vec![2.5, 1.8, 1.4]],
            freight: 90.0,
        }
    }
}

impl Transportation {
    /// Cost in thousands of dollars per case on a route.
    pub fn unit_cost(&self, plant: usize, market: usize) -> f64 {
        self.freight * self.distance[plant][market] / 1000.0
    }

    /// Cases shipped on each route, `[plant][market]`.
    pub fn shipments(&self, vars: &Routes, solution: &Solution) -> Result<Vec<Vec<f64>>> {
        vars.cases.iter().map(|row| solution.values(row)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Routes {
    /// `cases[plant][market]`.
    pub cases: Vec<Vec<Variable>>,
}

impl Formulation for Transportation {
    const NAME: &'static str = "transportation";
    const BACKEND: &'static str = "GLOP";
    type Handles = Routes;

    fn formulate(&self) -> Result<(Model, Routes)> {
        check_len("distance table", self.distance.len(), self.plants.len())?;
        for (row, (plant, _)) in self.distance.iter().zip(&self.plants) {
            check_len(
                format_args!("distances from {plant}"),
                row.len(),
                self.markets.len(),
            )?;
        }
        let mut model = Model::new(Self::NAME);
        let cases: Vec<Vec<Variable>> = self
            .plants
            .iter()
            .map(|(plant, _)| {
                self.markets
                    .iter()
                    .map(|(market, _)| {
                        model.num_var(0.0, f64::INFINITY, format!("{plant}->{market}"))
                    })
                    .collect()
            })
            .collect();

        for (i, (plant, supply)) in self.plants.iter().enumerate() {
            model.add_constraint(
                sum(cases[i].iter())
                    .leq(*supply)
                    .named(format!("supply {plant}")),
            );
        }
        for (j, (market, demand)) in self.markets.iter().enumerate() {
            model.add_constraint(
                sum(cases.iter().map(|row| row[j]))
                    .equals(*demand)
                    .named(format!("demand {market}")),
            );
        }

        let mut cost = LinExpr::zero();
        for (i, row) in cases.iter().enumerate() {
            for (j, &x) in row.iter().enumerate() {
                cost.add_term(x, self.unit_cost(i, j));
            }
        }
        model.minimize(cost);
        Ok((model, Routes { cases }))
    }

    fn report(&self, vars: &Routes, solution: &Solution) -> Result<Report> {
        let mut report =
            Report::new("Transportation", solution).objective_label("Freight cost (k$)");
        for (i, row) in self.shipments(vars, solution)?.iter().enumerate() {
            for (j, cases) in row.iter().enumerate() {
                if *cases > 1e-6 {
                    report.line(format!(
                        "{:>10} -> {:<9} {:>8.1} cases",
                        self.plants[i].0, self.markets[j].0, cases
                    ));
                }
            }
        }
        Ok(report)
    }
}

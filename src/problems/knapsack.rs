//! 0-1 knapsack.
//!
//! Ten items with a value and a weight; the knapsack carries at most 200
//! weight units. Which items maximize the packed value?
//!
//! ```text
//! maximize    sum_i value[i] * x[i]
//! subject to  sum_i weight[i] * x[i] <= capacity
//!             x binary
//! ```

use crate::constraints::ConstraintExt;
use crate::error::Result;
use crate::expr::{dot, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

#[derive(Debug, Clone)]
pub struct Knapsack {
    pub values: Vec<f64>,
    pub weights: Vec<f64>,
    pub capacity: f64,
}

impl Default for Knapsack {
    fn default() -> Self {
        Knapsack {
            values: vec![
                360.0, 83.0, 59.0, 130.0, 431.0, 67.0, 230.0, 52.0, 93.0, 125.0,
            ],
            weights: vec![7.0, 0.0, 30.0, 22.0, 80.0, 94.0, 11.0, 81.0, 70.0, 64.0],
            capacity: 200.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KnapsackVars {
    pub take: Vec<Variable>,
}

impl Knapsack {
    /// Indices of the packed items.
    pub fn packed(&self, vars: &KnapsackVars, solution: &Solution) -> Result<Vec<usize>> {
        Ok(solution
            .values(&vars.take)?
            .into_iter()
            .enumerate()
            .filter(|(_, x)| *x > 0.5)
            .map(|(i, _)| i)
            .collect())
    }
}

impl Formulation for Knapsack {
    const NAME: &'static str = "knapsack";
    const BACKEND: &'static str = "CBC";
    type Handles = KnapsackVars;

    fn formulate(&self) -> Result<(Model, KnapsackVars)> {
        check_len("weights", self.weights.len(), self.values.len())?;
        let mut model = Model::new(Self::NAME);
        let take = model.bool_vars(self.values.len(), "item");
        model.add_constraint(
            dot(&self.weights, &take)
                .leq(self.capacity)
                .named("capacity"),
        );
        model.maximize(dot(&self.values, &take));
        Ok((model, KnapsackVars { take }))
    }

    fn report(&self, vars: &KnapsackVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Knapsack", solution).objective_label("Total value");
        let packed = self.packed(vars, solution)?;
        let weight: f64 = packed.iter().map(|&i| self.weights[i]).sum();
        report.line(format!("Total weight: {weight} of {}", self.capacity));
        report.line(format!("Packed items: {packed:?}"));
        Ok(report)
    }
}

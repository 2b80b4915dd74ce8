//! Assignment problem.
//!
//! Five workers can each take at most one of four tasks, and every task
//! needs exactly one worker. Each worker/task pair has a cost. Find the
//! cheapest assignment.
//!
//! ```text
//! minimize    sum_wt cost[w][t] * x[w][t]
//! subject to  sum_t x[w][t] <= 1     for each worker
//!             sum_w x[w][t]  = 1     for each task
//!             x binary
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{sum, LinExpr, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

#[derive(Debug, Clone)]
pub struct Assignment {
    /// `costs[worker][task]`.
    pub costs: Vec<Vec<f64>>,
}

impl Default for Assignment {
    fn default() -> Self {
        Assignment {
            costs: vec![
                vec![90.0, 80.0, 75.0, 70.0],
                vec![35.0, 85.0, 55.0, 65.0],
                vec![125.0, 95.0, 90.0, 95.0],
                vec![45.0, 110.0, 95.0, 115.0],
                vec![50.0, 100.0, 90.0, 100.0],
            ],
        }
    }
}

impl Assignment {
    fn num_tasks(&self) -> usize {
        self.costs.first().map_or(0, Vec::len)
    }

    /// `(worker, task)` pairs of the chosen assignment.
    pub fn pairs(&self, vars: &AssignVars, solution: &Solution) -> Result<Vec<(usize, usize)>> {
        let mut pairs = Vec::new();
        for (w, row) in vars.assign.iter().enumerate() {
            for (t, x) in solution.values(row)?.into_iter().enumerate() {
                if x > 0.5 {
                    pairs.push((w, t));
                }
            }
        }
        Ok(pairs)
    }
}

#[derive(Debug, Clone)]
pub struct AssignVars {
    /// `assign[worker][task]`.
    pub assign: Vec<Vec<Variable>>,
}

impl Formulation for Assignment {
    const NAME: &'static str = "assignment";
    const BACKEND: &'static str = "CBC";
    type Handles = AssignVars;

    fn formulate(&self) -> Result<(Model, AssignVars)> {
        let tasks = self.num_tasks();
        if self.costs.iter().any(|row| row.len() != tasks) {
            return Err(FormularyError::InvalidModel(
                "cost matrix rows differ in length".into(),
            ));
        }
        let mut model = Model::new(Self::NAME);
        let assign: Vec<Vec<Variable>> = (0..self.costs.len())
            .map(|w| model.bool_vars(tasks, &format!("worker {w}")))
            .collect();

        for (w, row) in assign.iter().enumerate() {
            model.add_constraint(sum(row.iter()).leq(1.0).named(format!("worker {w}")));
        }
        for t in 0..tasks {
            model.add_constraint(
                sum(assign.iter().map(|row| row[t]))
                    .equals(1.0)
                    .named(format!("task {t}")),
            );
        }

        let mut cost = LinExpr::zero();
        for (row, costs) in assign.iter().zip(&self.costs) {
            for (&x, &c) in row.iter().zip(costs) {
                cost.add_term(x, c);
            }
        }
        model.minimize(cost);
        Ok((model, AssignVars { assign }))
    }

    fn report(&self, vars: &AssignVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Assignment", solution).objective_label("Total cost");
        for (w, t) in self.pairs(vars, solution)? {
            report.line(format!(
                "Worker {w} assigned to task {t}. Cost: {}",
                self.costs[w][t]
            ));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::solve;

    fn brute_force(costs: &[Vec<f64>], task: usize, used: &mut Vec<bool>) -> f64 {
        if task == costs[0].len() {
            return 0.0;
        }
        let mut best = f64::INFINITY;
        for w in 0..costs.len() {
            if !used[w] {
                used[w] = true;
                best = best.min(costs[w][task] + brute_force(costs, task + 1, used));
                used[w] = false;
            }
        }
        best
    }

    #[test]
    fn test_cheapest_assignment() {
        let problem = Assignment::default();
        let solved = solve(&problem).expect("solve failed");
        let cost = solved.solution.objective_value().expect("no value");
        let expected = brute_force(&problem.costs, 0, &mut vec![false; 5]);
        assert!((expected - 265.0).abs() < 1e-9);
        assert!((cost - expected).abs() < 1e-6);

        let pairs = problem.pairs(&solved.handles, &solved.solution).expect("values");
        assert_eq!(pairs.len(), 4);
        let mut workers: Vec<_> = pairs.iter().map(|(w, _)| *w).collect();
        workers.dedup();
        assert_eq!(workers.len(), 4);
    }

    #[test]
    fn test_ragged_costs_rejected() {
        let problem = Assignment {
            costs: vec![vec![1.0, 2.0], vec![3.0]],
        };
        assert!(solve(&problem).is_err());
    }
}

//! Solve status, settings and solutions shared by all backends.

use std::collections::HashMap;
use std::fmt;

use super::Backend;
use crate::error::{FormularyError, Result};
use crate::expr::{VarId, Variable};

/// Solution status reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// A solution was found but optimality is not proven.
    Feasible,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Numerical difficulties or an internal backend failure.
    Abnormal,
    /// The backend stopped (iteration or time limit) without a solution.
    NotSolved,
}

impl SolveStatus {
    /// Whether primal values are available with this status.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unbounded => "UNBOUNDED",
            SolveStatus::Abnormal => "ABNORMAL",
            SolveStatus::NotSolved => "NOT_SOLVED",
        };
        f.write_str(s)
    }
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum iterations (interior point backend).
    pub max_iter: u32,
    /// Time limit in seconds (interior point backend).
    pub time_limit: f64,
    /// Absolute tolerance.
    pub tol_gap_abs: f64,
    /// Relative tolerance.
    pub tol_gap_rel: f64,
    /// Largest distance from an integer still accepted as integral.
    pub integrality_tol: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbose: false,
            max_iter: 200,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
            integrality_tol: 1e-5,
        }
    }
}

/// Solution from a backend.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solution status.
    pub status: SolveStatus,
    /// Objective value (if solved), in the model's own direction.
    pub objective: Option<f64>,
    /// Primal variable values (if solved).
    pub primal: Option<HashMap<VarId, f64>>,
    /// Solve time in seconds.
    pub solve_time: f64,
    /// Number of iterations, where the backend reports them.
    pub iterations: u32,
    /// Backend that produced this solution.
    pub backend: Backend,
    pub(crate) integrality_tol: f64,
}

impl Solution {
    pub(crate) fn without_values(status: SolveStatus, backend: Backend, solve_time: f64) -> Self {
        Solution {
            status,
            objective: None,
            primal: None,
            solve_time,
            iterations: 0,
            backend,
            integrality_tol: Settings::default().integrality_tol,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn has_solution(&self) -> bool {
        self.primal.is_some()
    }

    /// Objective value, if a solution is available.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective
    }

    /// Value of a variable exactly as the backend reported it.
    pub fn raw_value(&self, var: Variable) -> Option<f64> {
        self.primal.as_ref().and_then(|p| p.get(&var.id()).copied())
    }

    /// Value of a variable at the solution.
    ///
    /// Integer and binary variables are rounded to the nearest integer when
    /// they are within the integrality tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if no solution is available or the variable is not
    /// part of the solved model.
    pub fn value(&self, var: Variable) -> Result<f64> {
        let primal = self
            .primal
            .as_ref()
            .ok_or(FormularyError::NotSolved(self.status))?;
        let raw = primal.get(&var.id()).copied().ok_or_else(|| {
            FormularyError::InvalidModel("variable not in solution".into())
        })?;
        if var.kind().is_integral() {
            let rounded = raw.round();
            if (rounded - raw).abs() <= self.integrality_tol {
                return Ok(rounded);
            }
        }
        Ok(raw)
    }

    /// Values of several variables, in order.
    pub fn values(&self, vars: &[Variable]) -> Result<Vec<f64>> {
        vars.iter().map(|v| self.value(*v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.verbose);
        assert_eq!(settings.max_iter, 200);
        assert!(settings.time_limit.is_infinite());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Optimal.to_string(), "OPTIMAL");
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
    }

    #[test]
    fn test_value_without_solution_errors() {
        let mut model = Model::new("none");
        let x = model.num_var(0.0, 1.0, "x");
        let solution = Solution::without_values(SolveStatus::Infeasible, Backend::MicroLp, 0.0);
        assert!(matches!(
            solution.value(x),
            Err(FormularyError::NotSolved(SolveStatus::Infeasible))
        ));
        assert_eq!(solution.raw_value(x), None);
    }

    #[test]
    fn test_integer_values_are_rounded() {
        let mut model = Model::new("round");
        let n = model.int_var(0.0, 10.0, "n");
        let x = model.num_var(0.0, 10.0, "x");
        let mut solution = Solution::without_values(SolveStatus::Optimal, Backend::MicroLp, 0.0);
        solution.primal = Some(HashMap::from([
            (n.id(), 2.9999999),
            (x.id(), 2.9999999),
        ]));

        assert_eq!(solution.value(n).ok(), Some(3.0));
        assert_eq!(solution.value(x).ok(), Some(2.9999999));
        assert_eq!(solution.raw_value(n), Some(2.9999999));
    }
}

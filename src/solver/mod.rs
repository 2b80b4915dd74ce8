//! Solver interface for formulary.
//!
//! This module provides:
//! - Backend selection by name (`Solver::create("GLOP")`)
//! - Matrix stuffing to convert models to conic form
//! - Clarabel integration for continuous LPs
//! - microlp integration for mixed-integer programs

pub mod clarabel;
pub mod microlp;
pub mod solution;
pub mod stuffing;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{FormularyError, Result};
use crate::model::Model;

pub use solution::{Settings, Solution, SolveStatus};
pub use stuffing::{stuff_problem, ConeDims, StuffedProblem};

/// External solver a model is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Interior point conic solver; continuous variables only.
    Clarabel,
    /// Simplex with branch-and-bound; continuous, integer and binary variables.
    MicroLp,
}

impl Backend {
    /// Canonical backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Clarabel => "CLARABEL",
            Backend::MicroLp => "MICROLP",
        }
    }

    pub fn supports_integers(&self) -> bool {
        matches!(self, Backend::MicroLp)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = FormularyError;

    /// Parse a backend name, case-insensitively.
    ///
    /// LP-style names route to Clarabel, MIP and CP-style names to microlp.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLARABEL" | "GLOP" | "PDLP" | "LP" => Ok(Backend::Clarabel),
            "MICROLP" | "CBC" | "SCIP" | "SAT" | "CP-SAT" | "CP_SAT" | "MIP" => {
                Ok(Backend::MicroLp)
            }
            _ => Err(FormularyError::UnknownBackend(s.to_string())),
        }
    }
}

/// A configured solver, created from a backend name.
#[derive(Debug, Clone)]
pub struct Solver {
    backend: Backend,
    requested: String,
    settings: Settings,
}

impl Solver {
    /// Create a solver for the named backend.
    ///
    /// # Errors
    ///
    /// Returns `UnknownBackend` if the name is not recognized.
    pub fn create(name: &str) -> Result<Self> {
        let backend = name.parse::<Backend>()?;
        debug!(requested = name, backend = %backend, "created solver");
        Ok(Solver {
            backend,
            requested: name.to_string(),
            settings: Settings::default(),
        })
    }

    /// Replace the solver settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The name the solver was created with.
    pub fn requested_name(&self) -> &str {
        &self.requested
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Solve a model once.
    ///
    /// Non-optimal outcomes (infeasible, unbounded, limits) are reported in
    /// the returned `Solution`'s status. An `Err` means the model could not
    /// be handed to the backend at all.
    pub fn solve(&self, model: &Model) -> Result<Solution> {
        model.validate()?;
        if model.has_integer_vars() && !self.backend.supports_integers() {
            return Err(FormularyError::Unsupported {
                backend: self.backend.name(),
                feature: "integer variables".into(),
            });
        }

        info!(
            model = model.name(),
            backend = %self.backend,
            vars = model.num_variables(),
            constraints = model.num_constraints(),
            "solving"
        );

        let start = Instant::now();
        let trivial_tol = self.settings.tol_gap_abs.max(1e-9);
        if let Some(c) = model
            .constraints()
            .iter()
            .find(|c| c.expr.is_empty() && !c.holds_trivially(trivial_tol))
        {
            warn!(constraint = %c, "constant constraint is violated");
            return Ok(Solution::without_values(
                SolveStatus::Infeasible,
                self.backend,
                start.elapsed().as_secs_f64(),
            ));
        }

        let solution = if model.num_variables() == 0 {
            let mut solution = Solution::without_values(
                SolveStatus::Optimal,
                self.backend,
                start.elapsed().as_secs_f64(),
            );
            solution.objective = Some(model.objective().expr().constant);
            solution.primal = Some(Default::default());
            solution
        } else {
            match self.backend {
                Backend::Clarabel => clarabel::solve(model, &self.settings)?,
                Backend::MicroLp => microlp::solve(model, &self.settings)?,
            }
        };

        match solution.status {
            SolveStatus::Optimal => info!(
                model = model.name(),
                objective = solution.objective,
                time = solution.solve_time,
                "solved"
            ),
            status => warn!(model = model.name(), %status, "no optimal solution"),
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{Constraint, ConstraintExt};

    #[test]
    fn test_backend_names() {
        assert_eq!("glop".parse::<Backend>().ok(), Some(Backend::Clarabel));
        assert_eq!("CP-SAT".parse::<Backend>().ok(), Some(Backend::MicroLp));
        assert_eq!(" cbc ".parse::<Backend>().ok(), Some(Backend::MicroLp));
        assert!(matches!(
            "GUROBI".parse::<Backend>(),
            Err(FormularyError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_create_unknown_backend() {
        assert!(Solver::create("does-not-exist").is_err());
        let solver = Solver::create("scip").expect("known backend");
        assert_eq!(solver.backend(), Backend::MicroLp);
        assert_eq!(solver.requested_name(), "scip");
    }

    #[test]
    fn test_integer_model_rejected_by_lp_backend() {
        let mut model = Model::new("mip");
        let n = model.int_var(0.0, 5.0, "n");
        model.maximize(n);
        let solver = Solver::create("GLOP").expect("known backend");
        assert!(matches!(
            solver.solve(&model),
            Err(FormularyError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_violated_constant_constraint_is_infeasible() {
        let mut model = Model::new("constant");
        let x = model.num_var(0.0, 1.0, "x");
        model.add_constraint(Constraint::geq(0.0, 1.0));
        model.minimize(x);
        let solution = Solver::create("CBC")
            .and_then(|s| s.solve(&model))
            .expect("solve failed");
        assert_eq!(solution.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_empty_model() {
        let mut model = Model::new("empty");
        model.minimize(4.0);
        let solution = Solver::create("GLOP")
            .and_then(|s| s.solve(&model))
            .expect("solve failed");
        assert!(solution.is_optimal());
        assert_eq!(solution.objective_value(), Some(4.0));
    }

    #[test]
    fn test_backends_agree_on_lp() {
        let mut model = Model::new("agree");
        let x = model.num_var(0.0, f64::INFINITY, "x");
        let y = model.num_var(0.0, f64::INFINITY, "y");
        model.add_constraint((x + 2.0 * y).geq(4.0));
        model.add_constraint((3.0 * x + y).geq(6.0));
        model.minimize(x + y);

        let lp = Solver::create("GLOP").and_then(|s| s.solve(&model)).expect("lp");
        let mip = Solver::create("CBC").and_then(|s| s.solve(&model)).expect("mip");
        let a = lp.objective_value().unwrap_or(f64::NAN);
        let b = mip.objective_value().unwrap_or(f64::NAN);
        // x = 8/5, y = 6/5
        assert!((a - 2.8).abs() < 1e-5, "clarabel got {a}");
        assert!((b - 2.8).abs() < 1e-9, "microlp got {b}");
    }
}

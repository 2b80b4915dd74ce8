//! # formulary
//!
//! A corpus of classic operations-research word problems, each formulated
//! as a linear or mixed-integer program and solved once.
//!
//! Every instance follows the same script: declare variables with bounds,
//! add linear constraints, set a linear objective, solve, and report the
//! outcome. The modeling layer is small and declarative; solving is
//! delegated to external engines selected by name.
//!
//! ## Quick Start
//!
//! ```ignore
//! use formulary::prelude::*;
//!
//! let mut model = Model::new("production");
//! let a = model.int_var(0.0, f64::INFINITY, "A");
//! let b = model.int_var(0.0, f64::INFINITY, "B");
//! model.add_constraint((2.0 * a + b).leq(100.0));
//! model.add_constraint((a + 2.0 * b).leq(80.0));
//! model.maximize(40.0 * a + 30.0 * b);
//!
//! let solution = Solver::create("CBC")?.solve(&model)?;
//! println!("Profit: {:?}", solution.objective_value());
//! ```
//!
//! ## Backends
//!
//! - **Clarabel** (interior point) handles continuous models. Requested as
//!   `CLARABEL`, `GLOP`, `PDLP` or `LP`.
//! - **microlp** (simplex with branch and bound) handles continuous,
//!   integer and binary variables. Requested as `MICROLP`, `CBC`, `SCIP`,
//!   `SAT`, `CP-SAT` or `MIP`.
//!
//! ## Linearization
//!
//! Products of binaries, absolute values, max/min, all-different and
//! big-M implications are rewritten into linear constraints by the helpers
//! in [`linearize`].

pub mod constraints;
pub mod error;
pub mod expr;
pub mod linearize;
pub mod logging;
pub mod model;
pub mod problems;
pub mod report;
pub mod solver;
pub mod sparse;
pub mod verify;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use formulary::prelude::*;
/// ```
pub mod prelude {
    // Expressions
    pub use crate::expr::{dot, sum, LinExpr, VarKind, Variable};

    // Constraints
    pub use crate::constraints::{Constraint, ConstraintExt, Sense};

    // Model
    pub use crate::model::{ConstraintId, Model, Objective};

    // Linearization
    pub use crate::linearize::{abs_value, all_different, binary_product, implies, max_of, min_of};

    // Solver
    pub use crate::solver::{Backend, Settings, Solution, SolveStatus, Solver};

    // Instances
    pub use crate::problems::{Formulation, Solved};
    pub use crate::report::Report;

    // Errors
    pub use crate::error::{FormularyError, Result};
}

// Re-export main types at crate root
pub use error::{FormularyError, Result};
pub use model::Model;
pub use solver::{Solution, SolveStatus, Solver};

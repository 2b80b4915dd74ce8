//! Expression types and creation utilities.
//!
//! This module provides the building blocks of every formulation:
//! - `Variable` - A handle to a decision variable created by a `Model`
//! - `LinExpr` - A linear expression over variables plus a constant
//! - `sum` / `dot` - Aggregation helpers

pub mod linear;
pub mod variable;

pub use linear::{dot, sum, LinExpr};
pub use variable::{VarId, VarKind, Variable, VariableData};

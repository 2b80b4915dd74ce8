//! Constraint types and builders.

pub mod constraint;

pub use constraint::{Constraint, ConstraintExt, Sense};

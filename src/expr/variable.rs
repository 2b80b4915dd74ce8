//! Decision variables.
//!
//! A `Variable` is a lightweight `Copy` handle: a unique id plus the
//! variable's semantic kind. Bounds and names live in the owning `Model`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for variables.
///
/// Ids are process-wide unique, so handles from different models never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u64);

impl VarId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        VarId(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for VarId {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic type of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Real-valued.
    Continuous,
    /// Integer-valued.
    Integer,
    /// Integer restricted to {0, 1}.
    Binary,
}

impl VarKind {
    /// Whether values of this kind must be integral.
    pub fn is_integral(&self) -> bool {
        !matches!(self, VarKind::Continuous)
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VarKind::Continuous => "continuous",
            VarKind::Integer => "integer",
            VarKind::Binary => "binary",
        };
        f.write_str(s)
    }
}

/// Handle to a decision variable created by a `Model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    id: VarId,
    kind: VarKind,
}

impl Variable {
    pub(crate) fn new(kind: VarKind) -> Self {
        Variable {
            id: VarId::new(),
            kind,
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }
}

/// Per-variable data stored by the model.
#[derive(Debug, Clone)]
pub struct VariableData {
    /// The handle returned to the caller.
    pub var: Variable,
    /// Lower bound (may be `f64::NEG_INFINITY`).
    pub lower: f64,
    /// Upper bound (may be `f64::INFINITY`).
    pub upper: f64,
    /// Display name.
    pub name: String,
}

impl VariableData {
    /// Check whether a value lies within the bounds, up to `tol`.
    pub fn within_bounds(&self, value: f64, tol: f64) -> bool {
        value >= self.lower - tol && value <= self.upper + tol
    }

    /// Whether lower and upper bound coincide.
    pub fn is_fixed(&self) -> bool {
        self.lower == self.upper
    }
}

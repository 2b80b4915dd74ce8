//! Matrix stuffing: converts a `Model` to conic standard form.
//!
//! The interior point backend solves
//!
//! ```text
//! minimize    q' x
//! subject to  A x + s = b,  s in K
//! ```
//!
//! where `K` is a product of a zero cone (equalities) followed by a
//! nonnegative cone (inequalities). Finite variable bounds become rows of
//! the nonnegative cone; fixed variables become equalities.

use nalgebra_sparse::CscMatrix;

use crate::constraints::Sense;
use crate::model::{Model, Objective};
use crate::sparse::csc_from_triplets;

/// Cone dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows.
    pub nonneg: usize,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg
    }
}

/// Stuffed problem ready for a conic backend.
#[derive(Debug)]
pub struct StuffedProblem {
    /// Linear cost vector q (n), already negated for maximization.
    pub q: Vec<f64>,
    /// Constraint matrix A (m x n).
    pub a: CscMatrix<f64>,
    /// Constraint vector b (m).
    pub b: Vec<f64>,
    /// Cone dimensions.
    pub cone_dims: ConeDims,
    /// Constant offset in the model's objective.
    pub objective_offset: f64,
    /// Whether `q` was negated to turn a maximization into a minimization.
    pub negated: bool,
}

impl StuffedProblem {
    /// Number of optimization variables.
    pub fn num_vars(&self) -> usize {
        self.q.len()
    }
}

/// Accumulates rows in triplet form.
#[derive(Default)]
struct RowBuilder {
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
    b: Vec<f64>,
}

impl RowBuilder {
    fn push_row(&mut self, entries: impl IntoIterator<Item = (usize, f64)>, rhs: f64) {
        let row = self.b.len();
        for (col, val) in entries {
            self.rows.push(row);
            self.cols.push(col);
            self.vals.push(val);
        }
        self.b.push(rhs);
    }
}

/// Build the stuffed problem from a model.
///
/// Constraints without variables are skipped; the caller decides their
/// feasibility before stuffing.
pub fn stuff_problem(model: &Model) -> StuffedProblem {
    let n = model.num_variables();

    // Objective
    let (expr, negated) = match model.objective() {
        Objective::Minimize(e) => (e, false),
        Objective::Maximize(e) => (e, true),
    };
    let sign = if negated { -1.0 } else { 1.0 };
    let mut q = vec![0.0; n];
    for (var, c) in expr.terms() {
        if let Some(col) = model.column(var) {
            q[col] += sign * c;
        }
    }

    // Equalities go first, in the zero cone
    let mut zero = RowBuilder::default();
    // Inequalities as a x <= b, in the nonnegative cone
    let mut nonneg = RowBuilder::default();

    for c in model.constraints() {
        if c.expr.is_empty() {
            continue;
        }
        let entries: Vec<(usize, f64)> = c
            .expr
            .terms()
            .filter_map(|(var, coeff)| model.column(var).map(|col| (col, coeff)))
            .collect();
        match c.sense {
            Sense::Eq => zero.push_row(entries, c.rhs),
            Sense::Le => nonneg.push_row(entries, c.rhs),
            Sense::Ge => nonneg.push_row(entries.into_iter().map(|(col, v)| (col, -v)), -c.rhs),
        }
    }

    for (col, v) in model.variables().iter().enumerate() {
        if v.is_fixed() {
            zero.push_row([(col, 1.0)], v.lower);
            continue;
        }
        if v.lower.is_finite() {
            // -x <= -lower
            nonneg.push_row([(col, -1.0)], -v.lower);
        }
        if v.upper.is_finite() {
            nonneg.push_row([(col, 1.0)], v.upper);
        }
    }

    let cone_dims = ConeDims {
        zero: zero.b.len(),
        nonneg: nonneg.b.len(),
    };

    // Stack zero rows above nonneg rows
    let offset = cone_dims.zero;
    let mut rows = zero.rows;
    rows.extend(nonneg.rows.iter().map(|r| r + offset));
    let mut cols = zero.cols;
    cols.extend(nonneg.cols);
    let mut vals = zero.vals;
    vals.extend(nonneg.vals);
    let mut b = zero.b;
    b.extend(nonneg.b);

    let a = csc_from_triplets(cone_dims.total(), n, rows, cols, vals);

    StuffedProblem {
        q,
        a,
        b,
        cone_dims,
        objective_offset: expr.constant,
        negated,
    }
}

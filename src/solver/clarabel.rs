//! Clarabel solver integration.
//!
//! Continuous LP backend. Integer variables are rejected before this
//! module is reached.

use std::collections::HashMap;

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;
use tracing::debug;

use super::stuffing::{stuff_problem, ConeDims, StuffedProblem};
use super::{Backend, Settings, Solution, SolveStatus};
use crate::error::{FormularyError, Result};
use crate::model::Model;
use crate::sparse::csc_mul_vec;

impl From<SolverStatus> for SolveStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => SolveStatus::Optimal,
            SolverStatus::AlmostSolved => SolveStatus::Feasible,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                SolveStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                SolveStatus::Unbounded
            }
            SolverStatus::MaxIterations | SolverStatus::MaxTime => SolveStatus::NotSolved,
            _ => SolveStatus::Abnormal,
        }
    }
}

/// Solve a continuous model with Clarabel.
pub fn solve(model: &Model, settings: &Settings) -> Result<Solution> {
    let stuffed = stuff_problem(model);
    debug!(
        vars = stuffed.num_vars(),
        zero_rows = stuffed.cone_dims.zero,
        nonneg_rows = stuffed.cone_dims.nonneg,
        "stuffed model for clarabel"
    );

    let n = stuffed.num_vars();
    let p = to_clarabel_csc(&CscMatrix::zeros(n, n));
    let a = to_clarabel_csc(&stuffed.a);
    let cones = to_clarabel_cones(&stuffed.cone_dims);

    let clarabel_settings = DefaultSettingsBuilder::default()
        .verbose(settings.verbose)
        .max_iter(settings.max_iter)
        .time_limit(settings.time_limit)
        .tol_gap_abs(settings.tol_gap_abs)
        .tol_gap_rel(settings.tol_gap_rel)
        .build()
        .map_err(|e| FormularyError::SolverError(e.to_string()))?;

    let mut solver = DefaultSolver::new(&p, &stuffed.q, &a, &stuffed.b, &cones, clarabel_settings);
    solver.solve();

    let status: SolveStatus = solver.solution.status.into();
    let solve_time = solver.solution.solve_time;
    let iterations = solver.info.iterations;

    if !status.has_solution() {
        let mut solution = Solution::without_values(status, Backend::Clarabel, solve_time);
        solution.iterations = iterations;
        return Ok(solution);
    }

    let x = DVector::from_column_slice(&solver.solution.x);
    debug!(
        max_violation = max_violation(&stuffed, &x),
        "clarabel primal residual"
    );

    let primal = unpack_primal(model, &x);
    let value = compute_objective(&stuffed, &x);

    Ok(Solution {
        status,
        objective: Some(value),
        primal: Some(primal),
        solve_time,
        iterations,
        backend: Backend::Clarabel,
        integrality_tol: settings.integrality_tol,
    })
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

/// Convert cone dimensions to Clarabel cones.
fn to_clarabel_cones(dims: &ConeDims) -> Vec<SupportedConeT<f64>> {
    let mut cones = Vec::new();

    if dims.zero > 0 {
        cones.push(SupportedConeT::ZeroConeT(dims.zero));
    }

    if dims.nonneg > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(dims.nonneg));
    }

    cones
}

/// Unpack primal solution into variable values.
fn unpack_primal(model: &Model, x: &DVector<f64>) -> HashMap<crate::expr::VarId, f64> {
    model
        .variables()
        .iter()
        .enumerate()
        .map(|(col, v)| (v.var.id(), x[col]))
        .collect()
}

/// Objective in the model's own direction: q' x (+/-) offset.
fn compute_objective(problem: &StuffedProblem, x: &DVector<f64>) -> f64 {
    let q = DVector::from_column_slice(&problem.q);
    let linear = q.dot(x);
    if problem.negated {
        -linear + problem.objective_offset
    } else {
        linear + problem.objective_offset
    }
}

/// Largest violation of A x + s = b, s in K.
fn max_violation(problem: &StuffedProblem, x: &DVector<f64>) -> f64 {
    let ax = csc_mul_vec(&problem.a, x);
    let zero = problem.cone_dims.zero;
    ax.iter()
        .zip(&problem.b)
        .enumerate()
        .map(|(i, (lhs, rhs))| {
            if i < zero {
                (lhs - rhs).abs()
            } else {
                (lhs - rhs).max(0.0)
            }
        })
        .fold(0.0, f64::max)
}

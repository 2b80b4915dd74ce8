//! microlp solver integration.
//!
//! Simplex with branch-and-bound for integer and binary variables. Used for
//! every mixed-integer model and available for continuous ones too.

use std::collections::HashMap;
use std::time::Instant;

use microlp::{ComparisonOp, OptimizationDirection, Problem};
use tracing::debug;

use super::{Backend, Settings, Solution, SolveStatus};
use crate::constraints::Sense;
use crate::error::{FormularyError, Result};
use crate::expr::VarKind;
use crate::model::{Model, Objective};

impl From<Sense> for ComparisonOp {
    fn from(sense: Sense) -> Self {
        match sense {
            Sense::Le => ComparisonOp::Le,
            Sense::Ge => ComparisonOp::Ge,
            Sense::Eq => ComparisonOp::Eq,
        }
    }
}

/// Rounds of bound tightening run before integer columns are built.
const PROPAGATION_PASSES: usize = 8;

/// Slack allowed when rounding a derived bound to an integer.
const ROUNDING_TOL: f64 = 1e-9;

/// Tighten variable bounds using the rows of the model.
///
/// Each row `sum_j a[j] x[j] (<=|>=|==) rhs` bounds every `x[j]` whose
/// companions in the row all have finite bounds on the relevant side.
/// Returns `(lower, upper)` per column; declared bounds are never loosened.
fn propagate_bounds(model: &Model) -> Vec<(f64, f64)> {
    let mut bounds: Vec<(f64, f64)> = model
        .variables()
        .iter()
        .map(|v| (v.lower, v.upper))
        .collect();
    let rows: Vec<(Vec<(usize, f64)>, Sense, f64)> = model
        .constraints()
        .iter()
        .map(|c| {
            let terms = c
                .expr
                .terms()
                .filter(|(_, a)| *a != 0.0)
                .filter_map(|(var, a)| model.column(var).map(|col| (col, a)))
                .collect();
            (terms, c.sense, c.rhs)
        })
        .collect();

    for _ in 0..PROPAGATION_PASSES {
        let mut changed = false;
        for (terms, sense, rhs) in &rows {
            if matches!(sense, Sense::Le | Sense::Eq) {
                changed |= tighten_row(&mut bounds, terms, *rhs, true);
            }
            if matches!(sense, Sense::Ge | Sense::Eq) {
                changed |= tighten_row(&mut bounds, terms, *rhs, false);
            }
        }
        if !changed {
            break;
        }
    }
    bounds
}

/// Tighten bounds from one side of a row.
///
/// With `upper_row` the row reads `activity <= rhs`, otherwise
/// `activity >= rhs`. Returns whether any bound moved.
fn tighten_row(
    bounds: &mut [(f64, f64)],
    terms: &[(usize, f64)],
    rhs: f64,
    upper_row: bool,
) -> bool {
    // Smallest (or largest) contribution of each term to the activity.
    let extreme = |col: usize, a: f64, bounds: &[(f64, f64)]| {
        let (lo, hi) = bounds[col];
        match (upper_row, a > 0.0) {
            (true, true) | (false, false) => a * lo,
            (true, false) | (false, true) => a * hi,
        }
    };
    let mut finite_sum = 0.0;
    let mut infinite = 0usize;
    for &(col, a) in terms {
        let e = extreme(col, a, bounds);
        if e.is_finite() {
            finite_sum += e;
        } else {
            infinite += 1;
        }
    }

    let mut changed = false;
    for &(col, a) in terms {
        let own = extreme(col, a, bounds);
        let rest = if own.is_finite() {
            if infinite > 0 {
                continue;
            }
            finite_sum - own
        } else {
            if infinite > 1 {
                continue;
            }
            finite_sum
        };
        let limit = (rhs - rest) / a;
        // a * x <= rhs - rest (or >=), dividing by a negative `a` flips it.
        let (lo, hi) = &mut bounds[col];
        if upper_row == (a > 0.0) {
            if limit < *hi - ROUNDING_TOL {
                *hi = limit;
                changed = true;
            }
        } else if limit > *lo + ROUNDING_TOL {
            *lo = limit;
            changed = true;
        }
    }
    changed
}

/// Round a bound of an integer column into the range microlp accepts.
///
/// microlp branches poorly on huge bounds, so a bound that is still
/// infinite after propagation is rejected instead of saturated.
fn int_bound(bound: f64, upper: bool, name: &str) -> Result<i32> {
    let rounded = if upper {
        (bound + ROUNDING_TOL).floor()
    } else {
        (bound - ROUNDING_TOL).ceil()
    };
    if !rounded.is_finite() || rounded.abs() >= f64::from(i32::MAX) {
        return Err(FormularyError::Unsupported {
            backend: "microlp",
            feature: format!(
                "integer variable '{name}' without a finite {} bound",
                if upper { "upper" } else { "lower" }
            ),
        });
    }
    Ok(rounded as i32)
}

/// Solve a model with microlp.
pub fn solve(model: &Model, settings: &Settings) -> Result<Solution> {
    let start = Instant::now();

    let (direction, objective) = match model.objective() {
        Objective::Minimize(e) => (OptimizationDirection::Minimize, e),
        Objective::Maximize(e) => (OptimizationDirection::Maximize, e),
    };

    let mut obj_coeffs = vec![0.0; model.num_variables()];
    for (var, c) in objective.terms() {
        if let Some(col) = model.column(var) {
            obj_coeffs[col] += c;
        }
    }

    let implied = if model.has_integer_vars() {
        propagate_bounds(model)
    } else {
        Vec::new()
    };

    let mut problem = Problem::new(direction);
    let mut columns: Vec<microlp::Variable> = Vec::with_capacity(model.num_variables());
    for (col, (v, &c)) in model.variables().iter().zip(&obj_coeffs).enumerate() {
        let column = match v.var.kind() {
            VarKind::Continuous => problem.add_var(c, (v.lower, v.upper)),
            VarKind::Integer => {
                let (lower, upper) = implied[col];
                let lower = int_bound(lower, false, &v.name)?;
                let upper = int_bound(upper, true, &v.name)?;
                // No integer between the bounds, e.g. 2n = 3.
                if lower > upper {
                    debug!(var = %v.name, lower, upper, "integer bounds cross");
                    return Ok(Solution::without_values(
                        SolveStatus::Infeasible,
                        Backend::MicroLp,
                        start.elapsed().as_secs_f64(),
                    ));
                }
                problem.add_integer_var(c, (lower, upper))
            }
            VarKind::Binary => problem.add_binary_var(c),
        };
        columns.push(column);
    }

    let mut rows = 0usize;
    for c in model.constraints() {
        if c.expr.is_empty() {
            continue;
        }
        let terms: Vec<(microlp::Variable, f64)> = c
            .expr
            .terms()
            .filter_map(|(var, coeff)| model.column(var).map(|col| (columns[col], coeff)))
            .collect();
        problem.add_constraint(terms.as_slice(), c.sense.into(), c.rhs);
        rows += 1;
    }
    debug!(
        vars = columns.len(),
        rows,
        integer = model.has_integer_vars(),
        "built microlp problem"
    );

    let outcome = problem.solve();
    let solve_time = start.elapsed().as_secs_f64();

    match outcome {
        Ok(sol) => {
            let primal: HashMap<_, _> = model
                .variables()
                .iter()
                .zip(&columns)
                .map(|(v, col)| (v.var.id(), sol[*col]))
                .collect();
            Ok(Solution {
                status: SolveStatus::Optimal,
                objective: Some(sol.objective() + objective.constant),
                primal: Some(primal),
                solve_time,
                iterations: 0,
                backend: Backend::MicroLp,
                integrality_tol: settings.integrality_tol,
            })
        }
        Err(microlp::Error::Infeasible) => Ok(Solution::without_values(
            SolveStatus::Infeasible,
            Backend::MicroLp,
            solve_time,
        )),
        Err(microlp::Error::Unbounded) => Ok(Solution::without_values(
            SolveStatus::Unbounded,
            Backend::MicroLp,
            solve_time,
        )),
        Err(other) => {
            debug!(error = %other, "microlp failed");
            Ok(Solution::without_values(
                SolveStatus::Abnormal,
                Backend::MicroLp,
                solve_time,
            ))
        }
    }
}

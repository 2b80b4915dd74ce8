//! Post-solve checks on a reported solution.
//!
//! These recompute everything from the reported variable values:
//! constraint satisfaction, bounds, integrality and the objective value.
//! Tolerances are relative: a quantity of magnitude `m` is compared with
//! `tol * (1 + |m|)`.

use std::fmt;

use crate::model::Model;
use crate::solver::Solution;

/// What a violation refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// A constraint, by index and optional name.
    Constraint { index: usize, name: Option<String> },
    /// A variable bound.
    Bound { name: String },
    /// An integer or binary variable with a fractional value.
    Integrality { name: String },
    /// A variable without a reported value.
    Missing { name: String },
    /// Reported objective differs from the recomputed one.
    Objective,
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Size of the violation in the units of the checked quantity.
    pub amount: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Constraint { index, name } => match name {
                Some(name) => write!(f, "constraint {name} violated by {}", self.amount),
                None => write!(f, "constraint {index} violated by {}", self.amount),
            },
            ViolationKind::Bound { name } => {
                write!(f, "bound of {name} violated by {}", self.amount)
            }
            ViolationKind::Integrality { name } => {
                write!(f, "{name} is {} away from an integer", self.amount)
            }
            ViolationKind::Missing { name } => write!(f, "{name} has no value"),
            ViolationKind::Objective => {
                write!(f, "objective differs from recomputation by {}", self.amount)
            }
        }
    }
}

/// Check constraints, bounds and integrality of the reported values.
pub fn check_feasibility(model: &Model, solution: &Solution, tol: f64) -> Vec<Violation> {
    let mut violations = Vec::new();

    for v in model.variables() {
        let Some(value) = solution.raw_value(v.var) else {
            violations.push(Violation {
                kind: ViolationKind::Missing {
                    name: v.name.clone(),
                },
                amount: f64::INFINITY,
            });
            continue;
        };
        let scale = 1.0 + value.abs();
        let below = (v.lower - value).max(0.0);
        let above = (value - v.upper).max(0.0);
        if below.max(above) > tol * scale {
            violations.push(Violation {
                kind: ViolationKind::Bound {
                    name: v.name.clone(),
                },
                amount: below.max(above),
            });
        }
        // Integrality is absolute: a large value is no closer to a whole number.
        if v.var.kind().is_integral() {
            let frac = (value - value.round()).abs();
            if frac > tol {
                violations.push(Violation {
                    kind: ViolationKind::Integrality {
                        name: v.name.clone(),
                    },
                    amount: frac,
                });
            }
        }
    }

    for (index, c) in model.constraints().iter().enumerate() {
        if !c.is_satisfied(|var| solution.raw_value(var), tol) {
            violations.push(Violation {
                kind: ViolationKind::Constraint {
                    index,
                    name: c.name.clone(),
                },
                amount: c.violation(|var| solution.raw_value(var)),
            });
        }
    }

    violations
}

/// Recompute the objective from the reported values and compare.
pub fn check_objective(model: &Model, solution: &Solution, tol: f64) -> Option<Violation> {
    let reported = solution.objective_value()?;
    let recomputed = model
        .objective()
        .expr()
        .evaluate(|var| solution.raw_value(var));
    let diff = (reported - recomputed).abs();
    if diff.is_nan() || diff > tol * (1.0 + recomputed.abs()) {
        Some(Violation {
            kind: ViolationKind::Objective,
            amount: diff,
        })
    } else {
        None
    }
}

/// Run every check; `Ok` when the solution passes all of them.
pub fn verify(model: &Model, solution: &Solution, tol: f64) -> Result<(), Vec<Violation>> {
    let mut violations = check_feasibility(model, solution, tol);
    violations.extend(check_objective(model, solution, tol));
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

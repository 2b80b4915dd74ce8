//! Linearization helpers.
//!
//! Each helper adds auxiliary variables and linear constraints to a model so
//! that a non-linear relation can be expressed in an LP/MIP:
//!
//! - `binary_product`: z = x * y for binary x, y
//! - `abs_value`: t >= |e| (exact when t is minimized)
//! - `max_of` / `min_of`: epigraph / hypograph of a max / min
//! - `all_different`: pairwise distinct bounded integers via one-hot encoding
//! - `implies`: b = 1 forces a constraint, through a big-M relaxation

use crate::constraints::{Constraint, ConstraintExt, Sense};
use crate::error::{FormularyError, Result};
use crate::expr::{sum, LinExpr, VarKind, Variable};
use crate::model::Model;

/// Largest integer domain `all_different` will expand.
pub const MAX_ONE_HOT_DOMAIN: usize = 1024;

fn require_binary(model: &Model, var: Variable, what: &str) -> Result<()> {
    if var.kind() != VarKind::Binary || model.column(var).is_none() {
        let name = model
            .variable(var)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| format!("x{}", var.id().raw()));
        return Err(FormularyError::InvalidModel(format!(
            "{what} requires binary variables of this model, got {name}"
        )));
    }
    Ok(())
}

/// Add z = x1 * x2 * ... * xn for binary variables and return z.
///
/// z <= x_i for each i, and z >= sum(x_i) - (n - 1).
pub fn binary_product(model: &mut Model, factors: &[Variable], name: &str) -> Result<Variable> {
    if factors.is_empty() {
        return Err(FormularyError::InvalidModel(
            "binary_product needs at least one factor".into(),
        ));
    }
    for &f in factors {
        require_binary(model, f, "binary_product")?;
    }
    let z = model.bool_var(name);
    for &f in factors {
        model.add_constraint(z.leq(f));
    }
    let n = factors.len() as f64;
    model.add_constraint(z.geq(sum(factors.iter()) - (n - 1.0)));
    Ok(z)
}

/// Add t >= |expr| and return t.
///
/// Only an upper envelope: t equals |expr| at the optimum when t appears
/// with a positive weight in a minimized objective.
pub fn abs_value(model: &mut Model, expr: impl Into<LinExpr>, name: &str) -> Variable {
    let expr = expr.into();
    let t = model.num_var(0.0, f64::INFINITY, name);
    model.add_constraint(t.geq(&expr));
    model.add_constraint(t.geq(-expr));
    t
}

/// Add t >= e_i for every expression and return t (exact when minimized).
pub fn max_of(model: &mut Model, exprs: impl IntoIterator<Item = LinExpr>, name: &str) -> Variable {
    let t = model.num_var(f64::NEG_INFINITY, f64::INFINITY, name);
    for e in exprs {
        model.add_constraint(t.geq(e));
    }
    t
}

/// Add t <= e_i for every expression and return t (exact when maximized).
pub fn min_of(model: &mut Model, exprs: impl IntoIterator<Item = LinExpr>, name: &str) -> Variable {
    let t = model.num_var(f64::NEG_INFINITY, f64::INFINITY, name);
    for e in exprs {
        model.add_constraint(t.leq(e));
    }
    t
}

/// One-hot encoding produced by `all_different`.
#[derive(Debug, Clone)]
pub struct OneHot {
    /// Smallest value of the shared domain.
    pub min_value: i64,
    /// `selectors[i][k]` is 1 iff variable i takes value `min_value + k`.
    pub selectors: Vec<Vec<Variable>>,
}

/// Force bounded integer variables to take pairwise distinct values.
///
/// Every variable gets one binary selector per value of the union of the
/// domains; each variable selects exactly one value and each value is
/// selected at most once.
pub fn all_different(model: &mut Model, vars: &[Variable], name: &str) -> Result<OneHot> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in vars {
        let data = model.variable(v).ok_or_else(|| {
            FormularyError::InvalidModel(format!("{name}: variable not in model"))
        })?;
        if !v.kind().is_integral() || !data.lower.is_finite() || !data.upper.is_finite() {
            return Err(FormularyError::InvalidModel(format!(
                "{name}: all_different needs integer variables with finite bounds, got {}",
                data.name
            )));
        }
        lo = lo.min(data.lower.ceil());
        hi = hi.max(data.upper.floor());
    }
    if vars.is_empty() {
        return Ok(OneHot {
            min_value: 0,
            selectors: Vec::new(),
        });
    }
    let width = (hi - lo + 1.0).max(0.0) as usize;
    if width > MAX_ONE_HOT_DOMAIN {
        return Err(FormularyError::InvalidModel(format!(
            "{name}: domain of {width} values is too large to expand"
        )));
    }

    let mut selectors = Vec::with_capacity(vars.len());
    for (i, &v) in vars.iter().enumerate() {
        let row = model.bool_vars(width, &format!("{name}[{i}]"));
        model.add_constraint(sum(row.iter()).equals(1.0));
        let value: LinExpr = row
            .iter()
            .enumerate()
            .map(|(k, &b)| (lo + k as f64) * b)
            .sum();
        model.add_constraint(LinExpr::from(v).equals(value));
        selectors.push(row);
    }
    for k in 0..width {
        model.add_constraint(sum(selectors.iter().map(|row| row[k])).leq(1.0));
    }

    Ok(OneHot {
        min_value: lo as i64,
        selectors,
    })
}

/// Enforce `constraint` only when `indicator` is 1, using a big-M bound.
///
/// `big_m` must bound the constraint's possible violation; equality
/// constraints are split into two inequalities.
pub fn implies(
    model: &mut Model,
    indicator: Variable,
    constraint: Constraint,
    big_m: f64,
) -> Result<()> {
    require_binary(model, indicator, "implies")?;
    if !(big_m.is_finite() && big_m > 0.0) {
        return Err(FormularyError::InvalidModel(format!(
            "implies needs a positive finite big-M, got {big_m}"
        )));
    }
    let slack = big_m * (1.0 - indicator);
    let Constraint {
        expr, sense, rhs, ..
    } = constraint;
    match sense {
        Sense::Le => {
            model.add_constraint(expr.leq(rhs + slack));
        }
        Sense::Ge => {
            model.add_constraint(expr.geq(rhs - slack));
        }
        Sense::Eq => {
            model.add_constraint((&expr).leq(rhs + slack.clone()));
            model.add_constraint(expr.geq(rhs - slack));
        }
    }
    Ok(())
}

//! Linear expressions and operator overloading.
//!
//! A linear expression is `sum_i(c_i * x_i) + k`. Terms are kept in a
//! `BTreeMap` ordered by variable id so that iteration order, and therefore
//! the matrices handed to a backend, are deterministic.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::variable::{VarId, Variable};

/// A linear expression in standard form: sum_i(c_i * x_i) + constant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    /// Coefficient per variable.
    pub coeffs: BTreeMap<VarId, f64>,
    /// Kinds of the variables appearing in `coeffs`.
    vars: BTreeMap<VarId, Variable>,
    /// Constant term (offset).
    pub constant: f64,
}

impl LinExpr {
    /// Create the zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Create a constant expression.
    pub fn constant(value: f64) -> Self {
        LinExpr {
            constant: value,
            ..Self::default()
        }
    }

    /// Create a single-term expression `coeff * var`.
    pub fn term(var: Variable, coeff: f64) -> Self {
        let mut e = Self::zero();
        e.add_term(var, coeff);
        e
    }

    /// Add `coeff * var` in place, merging with an existing term.
    pub fn add_term(&mut self, var: Variable, coeff: f64) {
        let id = var.id();
        let c = self.coeffs.entry(id).or_insert(0.0);
        *c += coeff;
        if *c == 0.0 {
            self.coeffs.remove(&id);
            self.vars.remove(&id);
        } else {
            self.vars.insert(id, var);
        }
    }

    /// Check if this is a constant (no variables).
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient of `var` (zero if absent).
    pub fn coefficient(&self, var: Variable) -> f64 {
        self.coeffs.get(&var.id()).copied().unwrap_or(0.0)
    }

    /// Number of variable terms.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Iterate over `(variable, coefficient)` pairs in id order.
    pub fn terms(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.coeffs
            .iter()
            .filter_map(move |(id, c)| self.vars.get(id).map(|v| (*v, *c)))
    }

    /// Get all variables in this expression, in id order.
    pub fn variables(&self) -> Vec<Variable> {
        self.vars.values().copied().collect()
    }

    /// Add two linear expressions.
    pub fn add(&self, other: &LinExpr) -> LinExpr {
        let mut out = self.clone();
        out.add_assign_expr(other, 1.0);
        out
    }

    fn add_assign_expr(&mut self, other: &LinExpr, sign: f64) {
        for (var, c) in other.terms() {
            self.add_term(var, sign * c);
        }
        self.constant += sign * other.constant;
    }

    /// Negate a linear expression.
    pub fn neg(&self) -> LinExpr {
        self.scale(-1.0)
    }

    /// Scale by a scalar.
    pub fn scale(&self, scalar: f64) -> LinExpr {
        if scalar == 0.0 {
            return LinExpr::zero();
        }
        LinExpr {
            coeffs: self.coeffs.iter().map(|(k, v)| (*k, v * scalar)).collect(),
            vars: self.vars.clone(),
            constant: self.constant * scalar,
        }
    }

    /// Evaluate the expression given a value lookup per variable.
    ///
    /// Variables for which `value` returns `None` contribute NaN.
    pub fn evaluate(&self, mut value: impl FnMut(Variable) -> Option<f64>) -> f64 {
        self.terms().fold(self.constant, |acc, (var, c)| {
            acc + c * value(var).unwrap_or(f64::NAN)
        })
    }
}

/// Sum any collection of expression-like items.
pub fn sum<T: Into<LinExpr>>(items: impl IntoIterator<Item = T>) -> LinExpr {
    items.into_iter().fold(LinExpr::zero(), |mut acc, item| {
        acc += item.into();
        acc
    })
}

/// Weighted sum `sum_i(coeffs[i] * vars[i])`.
///
/// Extra entries in the longer slice are ignored.
pub fn dot(coeffs: &[f64], vars: &[Variable]) -> LinExpr {
    let mut e = LinExpr::zero();
    for (c, v) in coeffs.iter().zip(vars) {
        e.add_term(*v, *c);
    }
    e
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Variable> for LinExpr {
    fn from(var: Variable) -> Self {
        LinExpr::term(var, 1.0)
    }
}

impl From<&Variable> for LinExpr {
    fn from(var: &Variable) -> Self {
        LinExpr::term(*var, 1.0)
    }
}

impl From<f64> for LinExpr {
    fn from(value: f64) -> Self {
        LinExpr::constant(value)
    }
}

impl From<i32> for LinExpr {
    fn from(value: i32) -> Self {
        LinExpr::constant(value as f64)
    }
}

impl From<&LinExpr> for LinExpr {
    fn from(expr: &LinExpr) -> Self {
        expr.clone()
    }
}

// ============================================================================
// Operator overloading
// ============================================================================

impl<T: Into<LinExpr>> Add<T> for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: T) -> LinExpr {
        self += rhs.into();
        self
    }
}

impl<T: Into<LinExpr>> Add<T> for &LinExpr {
    type Output = LinExpr;

    fn add(self, rhs: T) -> LinExpr {
        self.clone() + rhs
    }
}

impl<T: Into<LinExpr>> Add<T> for Variable {
    type Output = LinExpr;

    fn add(self, rhs: T) -> LinExpr {
        LinExpr::from(self) + rhs
    }
}

impl Add<LinExpr> for f64 {
    type Output = LinExpr;

    fn add(self, rhs: LinExpr) -> LinExpr {
        rhs + self
    }
}

impl Add<Variable> for f64 {
    type Output = LinExpr;

    fn add(self, rhs: Variable) -> LinExpr {
        LinExpr::from(rhs) + self
    }
}

impl<T: Into<LinExpr>> Sub<T> for LinExpr {
    type Output = LinExpr;

    fn sub(mut self, rhs: T) -> LinExpr {
        self -= rhs.into();
        self
    }
}

impl<T: Into<LinExpr>> Sub<T> for &LinExpr {
    type Output = LinExpr;

    fn sub(self, rhs: T) -> LinExpr {
        self.clone() - rhs
    }
}

impl<T: Into<LinExpr>> Sub<T> for Variable {
    type Output = LinExpr;

    fn sub(self, rhs: T) -> LinExpr {
        LinExpr::from(self) - rhs
    }
}

impl Sub<LinExpr> for f64 {
    type Output = LinExpr;

    fn sub(self, rhs: LinExpr) -> LinExpr {
        LinExpr::constant(self) - rhs
    }
}

impl Sub<Variable> for f64 {
    type Output = LinExpr;

    fn sub(self, rhs: Variable) -> LinExpr {
        LinExpr::constant(self) - rhs
    }
}

impl<T: Into<LinExpr>> AddAssign<T> for LinExpr {
    fn add_assign(&mut self, rhs: T) {
        let rhs = rhs.into();
        self.add_assign_expr(&rhs, 1.0);
    }
}

impl<T: Into<LinExpr>> SubAssign<T> for LinExpr {
    fn sub_assign(&mut self, rhs: T) {
        let rhs = rhs.into();
        self.add_assign_expr(&rhs, -1.0);
    }
}

impl Mul<f64> for LinExpr {
    type Output = LinExpr;

    fn mul(self, rhs: f64) -> LinExpr {
        self.scale(rhs)
    }
}

impl Mul<f64> for &LinExpr {
    type Output = LinExpr;

    fn mul(self, rhs: f64) -> LinExpr {
        self.scale(rhs)
    }
}

impl Mul<f64> for Variable {
    type Output = LinExpr;

    fn mul(self, rhs: f64) -> LinExpr {
        LinExpr::term(self, rhs)
    }
}

impl Mul<LinExpr> for f64 {
    type Output = LinExpr;

    fn mul(self, rhs: LinExpr) -> LinExpr {
        rhs.scale(self)
    }
}

impl Mul<&LinExpr> for f64 {
    type Output = LinExpr;

    fn mul(self, rhs: &LinExpr) -> LinExpr {
        rhs.scale(self)
    }
}

impl Mul<Variable> for f64 {
    type Output = LinExpr;

    fn mul(self, rhs: Variable) -> LinExpr {
        LinExpr::term(rhs, self)
    }
}

impl Neg for LinExpr {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        self.scale(-1.0)
    }
}

impl Neg for &LinExpr {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        self.scale(-1.0)
    }
}

impl Neg for Variable {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        LinExpr::term(self, -1.0)
    }
}

impl Sum<LinExpr> for LinExpr {
    fn sum<I: Iterator<Item = LinExpr>>(iter: I) -> LinExpr {
        sum(iter)
    }
}

impl Sum<Variable> for LinExpr {
    fn sum<I: Iterator<Item = Variable>>(iter: I) -> LinExpr {
        sum(iter)
    }
}

impl<'a> Sum<&'a Variable> for LinExpr {
    fn sum<I: Iterator<Item = &'a Variable>>(iter: I) -> LinExpr {
        sum(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::VarKind;

    fn var() -> Variable {
        Variable::new(VarKind::Continuous)
    }

    #[test]
    fn test_lin_expr_zero() {
        let e = LinExpr::zero();
        assert!(e.is_constant());
        assert_eq!(e.constant, 0.0);
    }

    #[test]
    fn test_operators_merge_terms() {
        let x = var();
        let y = var();
        let e = 2.0 * x + 3.0 * y - x + 4.0;
        assert_eq!(e.coefficient(x), 1.0);
        assert_eq!(e.coefficient(y), 3.0);
        assert_eq!(e.constant, 4.0);
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn test_cancelled_terms_are_removed() {
        let x = var();
        let e = x - x;
        assert!(e.is_constant());
        assert!(e.variables().is_empty());
    }

    #[test]
    fn test_sum_and_dot() {
        let xs: Vec<Variable> = (0..3).map(|_| var()).collect();
        let s: LinExpr = xs.iter().sum();
        assert_eq!(s.len(), 3);

        let d = dot(&[1.0, 2.0, 3.0], &xs);
        let value = d.evaluate(|v| {
            xs.iter().position(|x| *x == v).map(|i| (i + 1) as f64)
        });
        // 1*1 + 2*2 + 3*3
        assert_eq!(value, 14.0);
    }

    #[test]
    fn test_scale_and_neg() {
        let x = var();
        let e = -(2.0 * (x + 1.0));
        assert_eq!(e.coefficient(x), -2.0);
        assert_eq!(e.constant, -2.0);
        assert!((e * 0.0).is_constant());
    }

    #[test]
    fn test_evaluate_missing_is_nan() {
        let x = var();
        let e = LinExpr::from(x);
        assert!(e.evaluate(|_| None).is_nan());
    }
}

//! Linear constraints.
//!
//! Every constraint is normalized to `expr (<=|>=|==) rhs` where `expr`
//! carries no constant term; constants from either side are folded into
//! `rhs` at construction.

use std::fmt;

use crate::expr::{LinExpr, Variable};

/// Relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// expr <= rhs
    Le,
    /// expr >= rhs
    Ge,
    /// expr == rhs
    Eq,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sense::Le => "<=",
            Sense::Ge => ">=",
            Sense::Eq => "==",
        };
        f.write_str(s)
    }
}

/// A linear constraint in an optimization model.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Left-hand side, without constant term.
    pub expr: LinExpr,
    /// Relational operator.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
    /// Optional name for reports and diagnostics.
    pub name: Option<String>,
}

impl Constraint {
    /// Create a constraint `lhs sense rhs`.
    pub fn new(lhs: impl Into<LinExpr>, sense: Sense, rhs: impl Into<LinExpr>) -> Self {
        let mut expr = lhs.into() - rhs.into();
        let rhs = -expr.constant;
        expr.constant = 0.0;
        Constraint {
            expr,
            sense,
            rhs,
            name: None,
        }
    }

    /// Create an equality constraint: lhs == rhs.
    pub fn eq(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> Self {
        Self::new(lhs, Sense::Eq, rhs)
    }

    /// Create an inequality constraint: lhs <= rhs.
    pub fn leq(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> Self {
        Self::new(lhs, Sense::Le, rhs)
    }

    /// Create an inequality constraint: lhs >= rhs.
    pub fn geq(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> Self {
        Self::new(lhs, Sense::Ge, rhs)
    }

    /// Attach a name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get all variables in this constraint.
    pub fn variables(&self) -> Vec<Variable> {
        self.expr.variables()
    }

    /// Amount by which the constraint is violated at the given point (zero if satisfied).
    pub fn violation(&self, value: impl FnMut(Variable) -> Option<f64>) -> f64 {
        let lhs = self.expr.evaluate(value);
        if lhs.is_nan() {
            return f64::INFINITY;
        }
        match self.sense {
            Sense::Le => (lhs - self.rhs).max(0.0),
            Sense::Ge => (self.rhs - lhs).max(0.0),
            Sense::Eq => (lhs - self.rhs).abs(),
        }
    }

    /// Check satisfaction with a tolerance scaled by the magnitude of `rhs`.
    pub fn is_satisfied(&self, value: impl FnMut(Variable) -> Option<f64>, tol: f64) -> bool {
        self.violation(value) <= tol * (1.0 + self.rhs.abs())
    }

    /// For a constraint with no variables, whether it holds trivially.
    pub(crate) fn holds_trivially(&self, tol: f64) -> bool {
        self.violation(|_| None) <= tol
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        let mut first = true;
        for (var, c) in self.expr.terms() {
            if first {
                write!(f, "{c}*x{}", var.id().raw())?;
                first = false;
            } else if c < 0.0 {
                write!(f, " - {}*x{}", -c, var.id().raw())?;
            } else {
                write!(f, " + {c}*x{}", var.id().raw())?;
            }
        }
        if first {
            f.write_str("0")?;
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}

/// Extension trait for creating constraints from expressions.
pub trait ConstraintExt {
    /// Create equality constraint: self == rhs.
    fn equals(self, rhs: impl Into<LinExpr>) -> Constraint;

    /// Create inequality constraint: self <= rhs.
    fn leq(self, rhs: impl Into<LinExpr>) -> Constraint;

    /// Create inequality constraint: self >= rhs.
    fn geq(self, rhs: impl Into<LinExpr>) -> Constraint;
}

impl<T: Into<LinExpr>> ConstraintExt for T {
    fn equals(self, rhs: impl Into<LinExpr>) -> Constraint {
        Constraint::eq(self, rhs)
    }

    fn leq(self, rhs: impl Into<LinExpr>) -> Constraint {
        Constraint::leq(self, rhs)
    }

    fn geq(self, rhs: impl Into<LinExpr>) -> Constraint {
        Constraint::geq(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::VarKind;

    #[test]
    fn test_constants_fold_into_rhs() {
        let x = Variable::new(VarKind::Continuous);
        // x + 3 <= 10  ->  x <= 7
        let c = (x + 3.0).leq(10.0);
        assert_eq!(c.sense, Sense::Le);
        assert_eq!(c.rhs, 7.0);
        assert_eq!(c.expr.constant, 0.0);
        assert_eq!(c.expr.coefficient(x), 1.0);
    }

    #[test]
    fn test_variables_on_both_sides() {
        let x = Variable::new(VarKind::Continuous);
        let y = Variable::new(VarKind::Continuous);
        // 2x >= y + 1  ->  2x - y >= 1
        let c = (2.0 * x).geq(y + 1.0);
        assert_eq!(c.expr.coefficient(x), 2.0);
        assert_eq!(c.expr.coefficient(y), -1.0);
        assert_eq!(c.rhs, 1.0);
    }

    #[test]
    fn test_violation() {
        let x = Variable::new(VarKind::Continuous);
        let le = x.leq(5.0);
        let ge = x.geq(5.0);
        let eq = x.equals(5.0);

        assert_eq!(le.violation(|_| Some(6.0)), 1.0);
        assert_eq!(le.violation(|_| Some(4.0)), 0.0);
        assert_eq!(ge.violation(|_| Some(4.0)), 1.0);
        assert_eq!(eq.violation(|_| Some(4.5)), 0.5);
        assert!(eq.is_satisfied(|_| Some(5.0 + 1e-9), 1e-6));
    }

    #[test]
    fn test_trivial_constraint() {
        let c = Constraint::leq(1.0, 2.0);
        assert!(c.expr.is_empty());
        assert!(c.holds_trivially(1e-9));
        assert!(!Constraint::geq(1.0, 2.0).holds_trivially(1e-9));
    }

    #[test]
    fn test_display() {
        let x = Variable::new(VarKind::Continuous);
        let c = x.leq(4.0).named("cap");
        let text = c.to_string();
        assert!(text.starts_with("cap: "));
        assert!(text.ends_with("<= 4"));
    }
}

//! Model definition: variables, constraints and the objective.
//!
//! A `Model` is created at the start of a formulation and dropped when the
//! formulation is done with it:
//! ```ignore
//! let mut model = Model::new("production");
//! let a = model.int_var(0.0, f64::INFINITY, "product_a");
//! let b = model.int_var(0.0, f64::INFINITY, "product_b");
//! model.add_constraint((2.0 * a + b).leq(100.0));
//! model.maximize(40.0 * a + 30.0 * b);
//! let solution = Solver::create("CBC")?.solve(&model)?;
//! ```

use std::collections::HashMap;

use crate::constraints::Constraint;
use crate::error::{FormularyError, Result};
use crate::expr::{LinExpr, VarId, VarKind, Variable, VariableData};

/// Objective direction and expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// Minimize the expression.
    Minimize(LinExpr),
    /// Maximize the expression.
    Maximize(LinExpr),
}

impl Objective {
    /// Get the expression being optimized.
    pub fn expr(&self) -> &LinExpr {
        match self {
            Objective::Minimize(e) | Objective::Maximize(e) => e,
        }
    }

    /// Check if this is a minimization.
    pub fn is_minimize(&self) -> bool {
        matches!(self, Objective::Minimize(_))
    }
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Minimize(LinExpr::zero())
    }
}

/// Index of a constraint within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

impl ConstraintId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An optimization model.
#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    variables: Vec<VariableData>,
    columns: HashMap<VarId, usize>,
    constraints: Vec<Constraint>,
    objective: Objective,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn add_var(&mut self, kind: VarKind, lower: f64, upper: f64, name: String) -> Variable {
        let var = Variable::new(kind);
        self.columns.insert(var.id(), self.variables.len());
        self.variables.push(VariableData {
            var,
            lower,
            upper,
            name,
        });
        var
    }

    /// Create a continuous variable with bounds `[lower, upper]`.
    ///
    /// Use `f64::NEG_INFINITY` / `f64::INFINITY` for missing bounds.
    pub fn num_var(&mut self, lower: f64, upper: f64, name: impl Into<String>) -> Variable {
        self.add_var(VarKind::Continuous, lower, upper, name.into())
    }

    /// Create an integer variable with bounds `[lower, upper]`.
    pub fn int_var(&mut self, lower: f64, upper: f64, name: impl Into<String>) -> Variable {
        self.add_var(VarKind::Integer, lower, upper, name.into())
    }

    /// Create a binary variable.
    pub fn bool_var(&mut self, name: impl Into<String>) -> Variable {
        self.add_var(VarKind::Binary, 0.0, 1.0, name.into())
    }

    /// Create `n` continuous variables named `{prefix}[i]`.
    pub fn num_vars(&mut self, n: usize, lower: f64, upper: f64, prefix: &str) -> Vec<Variable> {
        (0..n)
            .map(|i| self.num_var(lower, upper, format!("{prefix}[{i}]")))
            .collect()
    }

    /// Create `n` integer variables named `{prefix}[i]`.
    pub fn int_vars(&mut self, n: usize, lower: f64, upper: f64, prefix: &str) -> Vec<Variable> {
        (0..n)
            .map(|i| self.int_var(lower, upper, format!("{prefix}[{i}]")))
            .collect()
    }

    /// Create `n` binary variables named `{prefix}[i]`.
    pub fn bool_vars(&mut self, n: usize, prefix: &str) -> Vec<Variable> {
        (0..n)
            .map(|i| self.bool_var(format!("{prefix}[{i}]")))
            .collect()
    }

    /// Add a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        self.constraints.push(constraint);
        ConstraintId(self.constraints.len() - 1)
    }

    /// Add several constraints.
    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = Constraint>) {
        self.constraints.extend(constraints);
    }

    /// Set a minimization objective, replacing any previous one.
    pub fn minimize(&mut self, expr: impl Into<LinExpr>) {
        self.objective = Objective::Minimize(expr.into());
    }

    /// Set a maximization objective, replacing any previous one.
    pub fn maximize(&mut self, expr: impl Into<LinExpr>) {
        self.objective = Objective::Maximize(expr.into());
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.0)
    }

    /// Variables in creation order; this is also the backend column order.
    pub fn variables(&self) -> &[VariableData] {
        &self.variables
    }

    pub fn variable(&self, var: Variable) -> Option<&VariableData> {
        self.column(var).map(|c| &self.variables[c])
    }

    /// Column index of a variable.
    pub fn column(&self, var: Variable) -> Option<usize> {
        self.columns.get(&var.id()).copied()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check if the model has any integer or binary variables.
    pub fn has_integer_vars(&self) -> bool {
        self.variables.iter().any(|v| v.var.kind().is_integral())
    }

    /// Validate bounds, coefficients and variable ownership.
    pub fn validate(&self) -> Result<()> {
        for v in &self.variables {
            if v.lower.is_nan() || v.upper.is_nan() {
                return Err(FormularyError::InvalidModel(format!(
                    "variable {} has a NaN bound",
                    v.name
                )));
            }
            if v.lower > v.upper {
                return Err(FormularyError::InvalidModel(format!(
                    "variable {} has lower bound {} above upper bound {}",
                    v.name, v.lower, v.upper
                )));
            }
        }

        let objective = self.objective.expr();
        self.check_expr(objective, "objective")?;
        if !objective.constant.is_finite() {
            return Err(FormularyError::InvalidModel(
                "objective constant is not finite".into(),
            ));
        }

        for (i, c) in self.constraints.iter().enumerate() {
            let label = c.name.clone().unwrap_or_else(|| format!("constraint {i}"));
            self.check_expr(&c.expr, &label)?;
            if c.rhs.is_nan() {
                return Err(FormularyError::InvalidModel(format!(
                    "{label} has a NaN right-hand side"
                )));
            }
        }
        Ok(())
    }

    fn check_expr(&self, expr: &LinExpr, label: &str) -> Result<()> {
        for (var, c) in expr.terms() {
            if !c.is_finite() {
                return Err(FormularyError::InvalidModel(format!(
                    "{label} has non-finite coefficient {c}"
                )));
            }
            if self.column(var).is_none() {
                return Err(FormularyError::InvalidModel(format!(
                    "{label} references a variable that does not belong to model {}",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintExt;

    #[test]
    fn test_variable_factories() {
        let mut model = Model::new("factories");
        let x = model.num_var(0.0, 10.0, "x");
        let n = model.int_var(-5.0, 5.0, "n");
        let b = model.bool_var("b");

        assert_eq!(model.num_variables(), 3);
        assert_eq!(model.column(x), Some(0));
        assert_eq!(model.column(b), Some(2));
        assert_eq!(model.variable(n).map(|d| d.lower), Some(-5.0));
        assert_eq!(b.kind(), VarKind::Binary);
        assert!(model.has_integer_vars());
    }

    #[test]
    fn test_objective_replaced() {
        let mut model = Model::new("objective");
        let x = model.num_var(0.0, 1.0, "x");
        model.minimize(x);
        model.maximize(2.0 * x);
        assert!(!model.objective().is_minimize());
        assert_eq!(model.objective().expr().coefficient(x), 2.0);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut model = Model::new("bad");
        model.num_var(3.0, 1.0, "x");
        assert!(matches!(
            model.validate(),
            Err(FormularyError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_validate_rejects_foreign_variable() {
        let mut other = Model::new("other");
        let y = other.num_var(0.0, 1.0, "y");

        let mut model = Model::new("model");
        let x = model.num_var(0.0, 1.0, "x");
        model.add_constraint((x + y).leq(1.0));
        assert!(model.validate().is_err());
        assert!(other.validate().is_ok());
    }

    #[test]
    fn test_constraint_ids() {
        let mut model = Model::new("ids");
        let x = model.num_var(0.0, 1.0, "x");
        let c0 = model.add_constraint(x.leq(1.0));
        let c1 = model.add_constraint(x.geq(0.5).named("floor"));
        assert_eq!(c0.index(), 0);
        assert_eq!(c1.index(), 1);
        assert_eq!(
            model.constraint(c1).and_then(|c| c.name.as_deref()),
            Some("floor")
        );
    }
}

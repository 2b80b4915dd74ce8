//! Least absolute deviation line fit.
//!
//! Fit a line `y = slope * x + intercept` to measurements so that the sum
//! of absolute residuals is smallest. Unlike least squares this ignores a
//! single wild measurement.
//!
//! ```text
//! minimize    sum_i t[i]
//! subject to  t[i] >= |y[i] - slope * x[i] - intercept|
//!             slope, intercept free
//! ```

use crate::error::{FormularyError, Result};
use crate::expr::{sum, LinExpr, Variable};
use crate::linearize::abs_value;
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

#[derive(Debug, Clone)]
pub struct CurveFitting {
    /// `(x, y)` measurements.
    pub points: Vec<(f64, f64)>,
}

impl Default for CurveFitting {
    fn default() -> Self {
        CurveFitting {
            points: vec![
                (0.0, 1.1),
                (1.0, 2.9),
                (2.0, 5.2),
                (3.0, 6.8),
                (4.0, 9.1),
                (5.0, 10.9),
                (6.0, 25.0),
                (7.0, 15.2),
            ],
        }
    }
}

/// Line coefficients and residual bounds.
#[derive(Debug, Clone)]
pub struct LineVars {
    pub slope: Variable,
    pub intercept: Variable,
    pub residuals: Vec<Variable>,
}

/// Residual `y - slope * x - intercept` as an expression.
pub(crate) fn residual(x: f64, y: f64, slope: Variable, intercept: Variable) -> LinExpr {
    y - x * slope - intercept
}

/// Fitted `(slope, intercept)`.
pub fn line(vars: &LineVars, solution: &Solution) -> Result<(f64, f64)> {
    Ok((solution.value(vars.slope)?, solution.value(vars.intercept)?))
}

pub(crate) fn check_points(points: &[(f64, f64)]) -> Result<()> {
    if points.len() < 2 {
        return Err(FormularyError::InvalidModel(format!(
            "a line fit needs at least 2 points, got {}",
            points.len()
        )));
    }
    Ok(())
}

impl Formulation for CurveFitting {
    const NAME: &'static str = "curve_fitting";
    const BACKEND: &'static str = "GLOP";
    type Handles = LineVars;

    fn formulate(&self) -> Result<(Model, LineVars)> {
        check_points(&self.points)?;
        let mut model = Model::new(Self::NAME);
        let slope = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "slope");
        let intercept = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "intercept");

        let residuals: Vec<Variable> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                abs_value(
                    &mut model,
                    residual(x, y, slope, intercept),
                    &format!("abs residual {i}"),
                )
            })
            .collect();

        model.minimize(sum(residuals.iter()));
        Ok((
            model,
            LineVars {
                slope,
                intercept,
                residuals,
            },
        ))
    }

    fn report(&self, vars: &LineVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Least absolute deviation fit", solution)
            .objective_label("Sum of absolute residuals");
        let (a, b) = line(vars, solution)?;
        report.line(format!("y = {a:.4} * x + {b:.4}"));
        for &(x, y) in &self.points {
            report.line(format!("x = {x:>5.2}  y = {y:>7.3}  residual = {:>8.4}", y - a * x - b));
        }
        Ok(report)
    }
}

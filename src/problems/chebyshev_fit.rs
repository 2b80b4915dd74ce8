//! Minimax (Chebyshev) line fit.
//!
//! Fit a line to measurements so that the largest absolute residual is as
//! small as possible.
//!
//! ```text
//! minimize    t
//! subject to  t >=  y[i] - slope * x[i] - intercept
//!             t >= -(y[i] - slope * x[i] - intercept)
//! ```

use crate::error::Result;
use crate::linearize::max_of;
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::curve_fitting::{check_points, line, residual, LineVars};
use super::Formulation;

#[derive(Debug, Clone)]
pub struct ChebyshevFit {
    pub points: Vec<(f64, f64)>,
}

impl Default for ChebyshevFit {
    fn default() -> Self {
        ChebyshevFit {
            points: vec![
                (0.0, 0.9),
                (1.0, 3.2),
                (2.0, 4.8),
                (3.0, 7.3),
                (4.0, 8.7),
                (5.0, 11.4),
                (6.0, 12.8),
            ],
        }
    }
}

impl Formulation for ChebyshevFit {
    const NAME: &'static str = "chebyshev_fit";
    const BACKEND: &'static str = "GLOP";
    type Handles = LineVars;

    fn formulate(&self) -> Result<(Model, LineVars)> {
        check_points(&self.points)?;
        let mut model = Model::new(Self::NAME);
        let slope = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "slope");
        let intercept = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "intercept");

        let residuals = self.points.iter().flat_map(|&(x, y)| {
            let r = residual(x, y, slope, intercept);
            [-&r, r]
        });
        let worst = max_of(&mut model, residuals, "max residual");

        model.minimize(worst);
        Ok((
            model,
            LineVars {
                slope,
                intercept,
                residuals: vec![worst],
            },
        ))
    }

    fn report(&self, vars: &LineVars, solution: &Solution) -> Result<Report> {
        let mut report =
            Report::new("Chebyshev fit", solution).objective_label("Largest absolute residual");
        let (a, b) = line(vars, solution)?;
        report.line(format!("y = {a:.4} * x + {b:.4}"));
        Ok(report)
    }
}

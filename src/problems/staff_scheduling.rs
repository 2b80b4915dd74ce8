//! Cyclic staff scheduling.
//!
//! A hospital day is split into six 4-hour periods. Nurses start at the
//! beginning of any period and work two consecutive periods, wrapping
//! around midnight. Each period needs a minimum number of nurses on duty.
//! How few nurses cover every period?
//!
//! ```text
//! minimize    sum_t x[t]
//! subject to  x[t] + x[t-1 mod T] >= demand[t]
//!             0 <= x[t] <= max_t demand[t]   integer
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{sum, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

#[derive(Debug, Clone)]
pub struct StaffScheduling {
    /// Minimum staff on duty per period.
    pub demand: Vec<f64>,
    /// Consecutive periods in one shift.
    pub shift_length: usize,
}

impl Default for StaffScheduling {
    fn default() -> Self {
        StaffScheduling {
            demand: vec![4.0, 8.0, 10.0, 7.0, 12.0, 4.0],
            shift_length: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShiftVars {
    /// Staff starting at each period.
    pub starts: Vec<Variable>,
}

impl StaffScheduling {
    /// Periods whose starters are on duty during `period`.
    fn covering(&self, period: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.demand.len();
        (0..self.shift_length).map(move |k| (period + n - k % n) % n)
    }

    /// Staff starting at each period.
    pub fn starts(&self, vars: &ShiftVars, solution: &Solution) -> Result<Vec<i64>> {
        Ok(solution
            .values(&vars.starts)?
            .into_iter()
            .map(|x| x.round() as i64)
            .collect())
    }

    /// Staff on duty in each period for a given start plan.
    pub fn on_duty(&self, starts: &[i64]) -> Vec<i64> {
        (0..self.demand.len())
            .map(|t| self.covering(t).map(|s| starts[s]).sum())
            .collect()
    }
}

impl Formulation for StaffScheduling {
    const NAME: &'static str = "staff_scheduling";
    const BACKEND: &'static str = "CBC";
    type Handles = ShiftVars;

    fn formulate(&self) -> Result<(Model, ShiftVars)> {
        if self.shift_length == 0 || self.shift_length > self.demand.len() {
            return Err(FormularyError::InvalidModel(format!(
                "shift length {} does not fit {} periods",
                self.shift_length,
                self.demand.len()
            )));
        }
        // One period's starters alone can cover the busiest period.
        let most = self.demand.iter().fold(0.0, |m: f64, d| m.max(d.ceil()));
        let mut model = Model::new(Self::NAME);
        let starts = model.int_vars(self.demand.len(), 0.0, most, "start");

        for (t, demand) in self.demand.iter().enumerate() {
            model.add_constraint(
                sum(self.covering(t).map(|s| starts[s]))
                    .geq(*demand)
                    .named(format!("period {t}")),
            );
        }

        model.minimize(sum(starts.iter()));
        Ok((model, ShiftVars { starts }))
    }

    fn report(&self, vars: &ShiftVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Staff scheduling", solution).objective_label("Staff");
        let starts = self.starts(vars, solution)?;
        let duty = self.on_duty(&starts);
        for (t, demand) in self.demand.iter().enumerate() {
            report.line(format!(
                "period {t}: {} start, {} on duty (need {demand})",
                starts[t], duty[t]
            ));
        }
        Ok(report)
    }
}

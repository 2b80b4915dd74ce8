//! Plain-text result reports.
//!
//! A `Report` carries the status branch every instance performs after its
//! single solve: optimal results are printed in full, feasible-but-unproven
//! results get a caveat, and anything else prints a fixed message.

use std::fmt;

use crate::solver::{Solution, SolveStatus};

/// Message printed when no optimal or feasible solution is available.
pub const NO_SOLUTION: &str = "The problem does not have an optimal solution.";

/// Caveat printed for a feasible solution without optimality proof.
pub const NOT_PROVEN: &str = "A feasible solution was found, but it may not be optimal.";

/// Text report of one solve.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub status: SolveStatus,
    pub backend: String,
    pub objective_label: String,
    pub objective: Option<f64>,
    pub solve_time: f64,
    /// Result lines, only printed when a solution exists.
    pub lines: Vec<String>,
}

impl Report {
    /// Start a report from a solution.
    pub fn new(title: impl Into<String>, solution: &Solution) -> Self {
        Report {
            title: title.into(),
            status: solution.status,
            backend: solution.backend.to_string(),
            objective_label: "Objective value".into(),
            objective: solution.objective_value(),
            solve_time: solution.solve_time,
            lines: Vec::new(),
        }
    }

    /// Set the label printed before the objective value.
    pub fn objective_label(mut self, label: impl Into<String>) -> Self {
        self.objective_label = label.into();
        self
    }

    /// Append a result line.
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn has_solution(&self) -> bool {
        self.status.has_solution() && self.objective.is_some()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        writeln!(f, "Solver: {}  Status: {}", self.backend, self.status)?;
        match (self.status, self.objective) {
            (SolveStatus::Optimal, Some(obj)) => {
                writeln!(f, "{} = {:.4}", self.objective_label, obj)?;
            }
            (SolveStatus::Feasible, Some(obj)) => {
                writeln!(f, "{NOT_PROVEN}")?;
                writeln!(f, "{} = {:.4}", self.objective_label, obj)?;
            }
            _ => return writeln!(f, "{NO_SOLUTION}"),
        }
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "Solved in {:.3} ms", self.solve_time * 1e3)
    }
}

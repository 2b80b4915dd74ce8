//! N-queens.
//!
//! Place n queens on an n x n chessboard so that no two attack each other:
//! one queen per row and per column, at most one on every diagonal.

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{sum, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

#[derive(Debug, Clone)]
pub struct NQueens {
    pub size: usize,
}

impl Default for NQueens {
    fn default() -> Self {
        NQueens { size: 6 }
    }
}

#[derive(Debug, Clone)]
pub struct BoardVars {
    /// `queen[row][col]`.
    pub queen: Vec<Vec<Variable>>,
}

impl NQueens {
    /// Column of the queen in each row.
    pub fn placement(&self, vars: &BoardVars, solution: &Solution) -> Result<Vec<usize>> {
        vars.queen
            .iter()
            .enumerate()
            .map(|(r, row)| {
                solution
                    .values(row)?
                    .iter()
                    .position(|x| *x > 0.5)
                    .ok_or_else(|| {
                        FormularyError::NumericalError(format!("no queen in row {r}"))
                    })
            })
            .collect()
    }

    /// Whether no two queens of a placement attack each other.
    pub fn is_valid(placement: &[usize]) -> bool {
        placement.iter().enumerate().all(|(r1, &c1)| {
            placement.iter().enumerate().skip(r1 + 1).all(|(r2, &c2)| {
                c1 != c2 && (r2 - r1) != c1.abs_diff(c2)
            })
        })
    }
}

impl Formulation for NQueens {
    const NAME: &'static str = "n_queens";
    const BACKEND: &'static str = "CP-SAT";
    type Handles = BoardVars;

    fn formulate(&self) -> Result<(Model, BoardVars)> {
        let n = self.size;
        let mut model = Model::new(Self::NAME);
        let queen: Vec<Vec<Variable>> = (0..n)
            .map(|r| model.bool_vars(n, &format!("q{r}")))
            .collect();

        for (r, row) in queen.iter().enumerate() {
            model.add_constraint(sum(row.iter()).equals(1.0).named(format!("row {r}")));
        }
        for c in 0..n {
            model.add_constraint(
                sum(queen.iter().map(|row| row[c]))
                    .equals(1.0)
                    .named(format!("col {c}")),
            );
        }
        // Diagonals indexed by r + c and by r - c + n - 1; the corners hold
        // a single cell and need no constraint.
        for d in 1..(2 * n).saturating_sub(2) {
            let down: Vec<Variable> = (0..n)
                .filter_map(|r| d.checked_sub(r).filter(|&c| c < n).map(|c| queen[r][c]))
                .collect();
            model.add_constraint(sum(down).leq(1.0).named(format!("diag {d}")));

            let up: Vec<Variable> = (0..n)
                .filter_map(|r| {
                    (r + n - 1)
                        .checked_sub(d)
                        .filter(|&c| c < n)
                        .map(|c| queen[r][c])
                })
                .collect();
            model.add_constraint(sum(up).leq(1.0).named(format!("anti-diag {d}")));
        }

        Ok((model, BoardVars { queen }))
    }

    fn report(&self, vars: &BoardVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new(format!("{}-queens", self.size), solution)
            .objective_label("Objective");
        for col in self.placement(vars, solution)? {
            let row: String = (0..self.size)
                .map(|c| if c == col { 'Q' } else { '.' })
                .collect();
            report.line(row);
        }
        Ok(report)
    }
}

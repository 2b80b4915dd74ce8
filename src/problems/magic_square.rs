//! Magic square.
//!
//! Place the numbers 1..=n² on an n x n grid, each exactly once, so that
//! every row, every column and both diagonals add up to the same magic
//! constant n(n² + 1)/2. Some cells may be given in advance.
//!
//! Distinctness is expressed with a one-hot `all_different`.

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{sum, Variable};
use crate::linearize::all_different;
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

#[derive(Debug, Clone)]
pub struct MagicSquare {
    pub size: usize,
    /// `(row, col, value)` cells fixed in advance.
    pub givens: Vec<(usize, usize, i64)>,
}

impl Default for MagicSquare {
    fn default() -> Self {
        MagicSquare {
            size: 3,
            givens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridVars {
    /// `cells[row][col]`.
    pub cells: Vec<Vec<Variable>>,
}

impl MagicSquare {
    pub fn magic_constant(&self) -> i64 {
        let n = self.size as i64;
        n * (n * n + 1) / 2
    }

    pub fn grid(&self, vars: &GridVars, solution: &Solution) -> Result<Vec<Vec<i64>>> {
        vars.cells
            .iter()
            .map(|row| {
                Ok(solution
                    .values(row)?
                    .into_iter()
                    .map(|x| x.round() as i64)
                    .collect())
            })
            .collect()
    }

    /// Every line of the grid: rows, columns, then both diagonals.
    fn lines<T: Copy>(&self, cells: &[Vec<T>]) -> Vec<Vec<T>> {
        let n = self.size;
        let mut lines: Vec<Vec<T>> = cells.to_vec();
        lines.extend((0..n).map(|c| (0..n).map(|r| cells[r][c]).collect()));
        lines.push((0..n).map(|i| cells[i][i]).collect());
        lines.push((0..n).map(|i| cells[i][n - 1 - i]).collect());
        lines
    }

    /// Whether a grid is a magic square of this size.
    pub fn is_magic(&self, grid: &[Vec<i64>]) -> bool {
        let n = self.size;
        let mut seen: Vec<i64> = grid.iter().flatten().copied().collect();
        seen.sort_unstable();
        let expected: Vec<i64> = (1..=(n * n) as i64).collect();
        seen == expected
            && self
                .lines(grid)
                .iter()
                .all(|line| line.iter().sum::<i64>() == self.magic_constant())
    }
}

impl Formulation for MagicSquare {
    const NAME: &'static str = "magic_square";
    const BACKEND: &'static str = "CP-SAT";
    type Handles = GridVars;

    fn formulate(&self) -> Result<(Model, GridVars)> {
        let n = self.size;
        if n == 0 {
            return Err(FormularyError::InvalidModel("empty grid".into()));
        }
        let mut model = Model::new(Self::NAME);
        let top = (n * n) as f64;
        let cells: Vec<Vec<Variable>> = (0..n)
            .map(|r| model.int_vars(n, 1.0, top, &format!("row {r}")))
            .collect();

        let flat: Vec<Variable> = cells.iter().flatten().copied().collect();
        all_different(&mut model, &flat, "value")?;

        let magic = self.magic_constant() as f64;
        for (i, line) in self.lines(&cells).iter().enumerate() {
            model.add_constraint(sum(line.iter()).equals(magic).named(format!("line {i}")));
        }
        for &(r, c, value) in &self.givens {
            let cell = cells.get(r).and_then(|row| row.get(c)).ok_or_else(|| {
                FormularyError::InvalidModel(format!("given cell ({r}, {c}) is off the grid"))
            })?;
            model.add_constraint(cell.equals(value as f64));
        }

        Ok((model, GridVars { cells }))
    }

    fn report(&self, vars: &GridVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Magic square", solution).objective_label("Objective");
        for row in self.grid(vars, solution)? {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
            report.line(cells.join(""));
        }
        report.line(format!("Magic constant: {}", self.magic_constant()));
        Ok(report)
    }
}

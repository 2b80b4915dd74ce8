//! Six queens on a 6x6 board, none attacking another.
//!
//! Run with `cargo run --example n_queens`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::n_queens::NQueens;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(NQueens::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", NQueens::BACKEND);
            return Ok(());
        }
    };

    let board = NQueens::default();
    let (model, vars) = board.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        board.report(&vars, &solution)?
    } else {
        Report::new(NQueens::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

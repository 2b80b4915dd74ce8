//! 3x3 magic square with the numbers 1 to 9.
//!
//! Run with `cargo run --example magic_square`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::magic_square::MagicSquare;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(MagicSquare::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", MagicSquare::BACKEND);
            return Ok(());
        }
    };

    let square = MagicSquare::default();
    let (model, vars) = square.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        square.report(&vars, &solution)?
    } else {
        Report::new(MagicSquare::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

//! Diet problem: cheapest diet meeting daily nutrient minimums.
//!
//! Run with `cargo run --example diet`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::diet::Diet;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(Diet::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", Diet::BACKEND);
            return Ok(());
        }
    };

    let diet = Diet::default();
    let (model, vars) = diet.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        diet.report(&vars, &solution)?
    } else {
        Report::new(Diet::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

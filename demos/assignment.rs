//! Assignment: give each task to one worker at least total cost.
//!
//! Run with `cargo run --example assignment`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::assignment::Assignment;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(Assignment::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", Assignment::BACKEND);
            return Ok(());
        }
    };

    let problem = Assignment::default();
    let (model, vars) = problem.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        problem.report(&vars, &solution)?
    } else {
        Report::new(Assignment::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

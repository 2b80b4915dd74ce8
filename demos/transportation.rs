//! Transportation: ship cases from canneries to markets at least freight cost.
//!
//! Run with `cargo run --example transportation`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::transportation::Transportation;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(Transportation::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", Transportation::BACKEND);
            return Ok(());
        }
    };

    let problem = Transportation::default();
    let (model, vars) = problem.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        problem.report(&vars, &solution)?
    } else {
        Report::new(Transportation::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

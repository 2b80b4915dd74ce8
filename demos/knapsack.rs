//! 0-1 knapsack: most valuable set of items within the weight limit.
//!
//! Run with `cargo run --example knapsack`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::knapsack::Knapsack;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(Knapsack::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", Knapsack::BACKEND);
            return Ok(());
        }
    };

    let knapsack = Knapsack::default();
    let (model, vars) = knapsack.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        knapsack.report(&vars, &solution)?
    } else {
        Report::new(Knapsack::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

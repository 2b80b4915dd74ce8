//! Maximum flow from station 0 to station 4.
//!
//! Run with `cargo run --example max_flow`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::max_flow::MaxFlow;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(MaxFlow::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", MaxFlow::BACKEND);
            return Ok(());
        }
    };

    let network = MaxFlow::default();
    let (model, vars) = network.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        network.report(&vars, &solution)?
    } else {
        Report::new(MaxFlow::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

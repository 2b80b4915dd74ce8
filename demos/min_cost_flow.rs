//! Minimum cost flow from a supply node to two demand nodes.
//!
//! Run with `cargo run --example min_cost_flow`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::min_cost_flow::MinCostFlow;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(MinCostFlow::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", MinCostFlow::BACKEND);
            return Ok(());
        }
    };

    let network = MinCostFlow::default();
    let (model, vars) = network.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        network.report(&vars, &solution)?
    } else {
        Report::new(MinCostFlow::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

//! Coin change: pay 63 cents with as few coins as possible.
//!
//! Run with `cargo run --example coin_change`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::coin_change::CoinChange;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(CoinChange::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", CoinChange::BACKEND);
            return Ok(());
        }
    };

    let change = CoinChange::default();
    let (model, vars) = change.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        change.report(&vars, &solution)?
    } else {
        Report::new(CoinChange::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

//! Alloy blending: cheapest mix of purchasable alloys within composition ranges.
//!
//! Run with `cargo run --example blending`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::blending::Blending;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(Blending::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", Blending::BACKEND);
            return Ok(());
        }
    };

    let blend = Blending::default();
    let (model, vars) = blend.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        blend.report(&vars, &solution)?
    } else {
        Report::new(Blending::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

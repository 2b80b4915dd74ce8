//! Capacitated facility location with single sourcing.
//!
//! Run with `cargo run --example facility_location`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::facility_location::FacilityLocation;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(FacilityLocation::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", FacilityLocation::BACKEND);
            return Ok(());
        }
    };

    let sites = FacilityLocation::default();
    let (model, vars) = sites.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        sites.report(&vars, &solution)?
    } else {
        Report::new(FacilityLocation::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

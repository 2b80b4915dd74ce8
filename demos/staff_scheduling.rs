//! Staff scheduling: fewest nurses covering six cyclic periods.
//!
//! Run with `cargo run --example staff_scheduling`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::staff_scheduling::StaffScheduling;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(StaffScheduling::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", StaffScheduling::BACKEND);
            return Ok(());
        }
    };

    let schedule = StaffScheduling::default();
    let (model, vars) = schedule.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        schedule.report(&vars, &solution)?
    } else {
        Report::new(StaffScheduling::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

//! Team selection with pairwise synergy bonuses.
//!
//! Run with `cargo run --example team_selection`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::team_selection::TeamSelection;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(TeamSelection::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", TeamSelection::BACKEND);
            return Ok(());
        }
    };

    let team = TeamSelection::default();
    let (model, vars) = team.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        team.report(&vars, &solution)?
    } else {
        Report::new(TeamSelection::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

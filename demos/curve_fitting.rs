//! Least absolute deviation line fit with one wild measurement.
//!
//! Run with `cargo run --example curve_fitting`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::curve_fitting::CurveFitting;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(CurveFitting::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", CurveFitting::BACKEND);
            return Ok(());
        }
    };

    let fit = CurveFitting::default();
    let (model, vars) = fit.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        fit.report(&vars, &solution)?
    } else {
        Report::new(CurveFitting::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

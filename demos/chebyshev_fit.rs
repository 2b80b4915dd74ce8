//! Chebyshev line fit: minimize the largest residual.
//!
//! Run with `cargo run --example chebyshev_fit`; set `FORMULARY_LOG=debug` to see
//! what the backend does.

use anyhow::Result;
use formulary::problems::chebyshev_fit::ChebyshevFit;
use formulary::problems::Formulation;
use formulary::report::Report;
use formulary::{logging, Solver};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let solver = match Solver::create(ChebyshevFit::BACKEND) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver {}: {e}", ChebyshevFit::BACKEND);
            return Ok(());
        }
    };

    let fit = ChebyshevFit::default();
    let (model, vars) = fit.formulate()?;
    println!("Number of variables = {}", model.num_variables());
    println!("Number of constraints = {}", model.num_constraints());

    let solution = solver.solve(&model)?;
    let report = if solution.status.has_solution() {
        fit.report(&vars, &solution)?
    } else {
        Report::new(ChebyshevFit::NAME, &solution)
    };
    print!("{report}");
    Ok(())
}

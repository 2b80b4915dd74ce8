//! Production planning, written out step by step.
//!
//! A factory produces two products (A and B).
//! Product A: profit = $40, requires 2 hours labor, 1 unit material.
//! Product B: profit = $30, requires 1 hour labor, 2 units material.
//! Constraints: max 100 hours labor, max 80 units material.
//! Goal: maximize profit with whole units.

use anyhow::Result;
use formulary::prelude::*;

fn main() -> Result<()> {
    formulary::logging::init_tracing(false);

    // Step 1: create the solver.
    let solver = match Solver::create("CBC") {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Could not create solver CBC: {e}");
            return Ok(());
        }
    };

    // Step 2: variables.
    let mut model = Model::new("production_planning");
    let a = model.int_var(0.0, f64::INFINITY, "product_A");
    let b = model.int_var(0.0, f64::INFINITY, "product_B");
    println!("Number of variables = {}", model.num_variables());

    // Step 3: constraints.
    model.add_constraint((2.0 * a + b).leq(100.0).named("labor"));
    model.add_constraint((a + 2.0 * b).leq(80.0).named("material"));
    println!("Number of constraints = {}", model.num_constraints());

    // Step 4: objective.
    model.maximize(40.0 * a + 30.0 * b);

    // Step 5: solve and report.
    let solution = solver.solve(&model)?;
    match solution.status {
        SolveStatus::Optimal => {
            println!("Optimal solution found!");
            println!("Product A: {}", solution.value(a)?);
            println!("Product B: {}", solution.value(b)?);
            if let Some(profit) = solution.objective_value() {
                println!("Objective value: {profit}");
            }
        }
        _ => println!("{}", formulary::report::NO_SOLUTION),
    }

    Ok(())
}

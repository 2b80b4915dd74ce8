//! The corpus of word problems.
//!
//! Every instance follows the same five steps: declare variables, add
//! constraints, set the objective, solve once, report. An instance is a
//! data struct whose `Default` holds the word problem's numbers, plus a
//! `Formulation` impl that builds the model and reads the result back.

pub mod assignment;
pub mod blending;
pub mod chebyshev_fit;
pub mod coin_change;
pub mod curve_fitting;
pub mod diet;
pub mod facility_location;
pub mod knapsack;
pub mod magic_square;
pub mod max_flow;
pub mod min_cost_flow;
pub mod n_queens;
pub mod production;
pub mod staff_scheduling;
pub mod team_selection;
pub mod transportation;

use tracing::debug;

use crate::error::{FormularyError, Result};
use crate::model::Model;
use crate::report::Report;
use crate::solver::{Solution, Solver};

/// A word problem that can be turned into a model.
pub trait Formulation {
    /// Short identifier, also the demo name.
    const NAME: &'static str;
    /// Backend the instance is solved with by default.
    const BACKEND: &'static str;
    /// Variable handles needed to read the solution back.
    type Handles;

    /// Declare variables, constraints and objective.
    fn formulate(&self) -> Result<(Model, Self::Handles)>;

    /// Build the text report for a solved model.
    fn report(&self, handles: &Self::Handles, solution: &Solution) -> Result<Report>;
}

/// A formulation together with its solution.
#[derive(Debug)]
pub struct Solved<H> {
    pub model: Model,
    pub handles: H,
    pub solution: Solution,
}

/// Formulate and solve with the instance's default backend.
pub fn solve<F: Formulation>(problem: &F) -> Result<Solved<F::Handles>> {
    solve_with(problem, F::BACKEND)
}

/// Formulate and solve with a named backend.
pub fn solve_with<F: Formulation>(problem: &F, backend: &str) -> Result<Solved<F::Handles>> {
    let solver = Solver::create(backend)?;
    let (model, handles) = problem.formulate()?;
    debug!(
        problem = F::NAME,
        vars = model.num_variables(),
        constraints = model.num_constraints(),
        "formulated"
    );
    let solution = solver.solve(&model)?;
    Ok(Solved {
        model,
        handles,
        solution,
    })
}

/// Formulate, solve and report.
pub fn run<F: Formulation>(problem: &F) -> Result<Report> {
    let solved = solve(problem)?;
    if !solved.solution.status.has_solution() {
        // Report prints the fixed no-solution message.
        return Ok(Report::new(F::NAME, &solved.solution));
    }
    problem.report(&solved.handles, &solved.solution)
}

/// Check that a row of instance data has one entry per item it describes.
pub(crate) fn check_len(what: impl std::fmt::Display, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(FormularyError::InvalidModel(format!(
            "{what} has {got} entries, expected {expected}"
        )));
    }
    Ok(())
}

/// An entry of the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    pub description: &'static str,
    pub backend: &'static str,
    pub run: fn() -> Result<Report>,
}

fn entry<F: Formulation + Default>(description: &'static str) -> Entry {
    Entry {
        name: F::NAME,
        description,
        backend: F::BACKEND,
        run: || run(&F::default()),
    }
}

/// All instances with their default data.
pub fn catalog() -> Vec<Entry> {
    vec![
        entry::<diet::Diet>("Cheapest diet meeting nutrient minimums"),
        entry::<blending::Blending>("Cheapest alloy blend within composition ranges"),
        entry::<transportation::Transportation>("Ship supply to demand at least cost"),
        entry::<production::Production>("Integer product mix under labor and material limits"),
        entry::<staff_scheduling::StaffScheduling>("Fewest staff covering a cyclic shift plan"),
        entry::<assignment::Assignment>("Assign workers to tasks at least cost"),
        entry::<knapsack::Knapsack>("Most valuable items within a weight limit"),
        entry::<max_flow::MaxFlow>("Largest flow from source to sink"),
        entry::<min_cost_flow::MinCostFlow>("Route supplies to demands at least cost"),
        entry::<curve_fitting::CurveFitting>("Least absolute deviation line fit"),
        entry::<chebyshev_fit::ChebyshevFit>("Minimax line fit"),
        entry::<facility_location::FacilityLocation>("Open warehouses and serve customers"),
        entry::<team_selection::TeamSelection>("Pick a team with pairwise synergy bonuses"),
        entry::<coin_change::CoinChange>("Fewest coins for an amount"),
        entry::<magic_square::MagicSquare>("3x3 magic square with distinct digits"),
        entry::<n_queens::NQueens>("Place non-attacking queens on a board"),
    ]
}

/// Look up a catalog entry by name.
pub fn find(name: &str) -> Option<Entry> {
    catalog().into_iter().find(|e| e.name == name)
}

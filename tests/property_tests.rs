//! Randomized checks of instance invariants.

use formulary::problems::coin_change::CoinChange;
use formulary::problems::knapsack::Knapsack;
use formulary::problems::transportation::Transportation;
use formulary::problems::{solve, solve_with};
use formulary::verify::verify;
use proptest::prelude::*;

const PLANTS: [&str; 3] = ["p0", "p1", "p2"];
const MARKETS: [&str; 4] = ["m0", "m1", "m2", "m3"];

fn transportation() -> impl Strategy<Value = Transportation> {
    (
        prop::collection::vec(1u32..50, 2..=3),
        prop::collection::vec(1u32..40, 2..=4),
        prop::collection::vec(1u32..30, 12),
        0u32..20,
    )
        .prop_map(|(supply, demand, distances, slack)| {
            // Spread total demand plus some slack over the plants.
            let total: u32 = demand.iter().sum::<u32>() + slack;
            let weight: u32 = supply.iter().sum();
            let plants: Vec<(&'static str, f64)> = supply
                .iter()
                .zip(PLANTS)
                .map(|(w, name)| (name, (total * w).div_ceil(weight) as f64))
                .collect();
            let markets = demand
                .iter()
                .zip(MARKETS)
                .map(|(d, name)| (name, *d as f64))
                .collect();
            let distance = (0..plants.len())
                .map(|i| {
                    (0..demand.len())
                        .map(|j| distances[i * 4 + j] as f64 / 10.0)
                        .collect()
                })
                .collect();
            Transportation {
                plants,
                markets,
                distance,
                freight: 90.0,
            }
        })
}

fn knapsack() -> impl Strategy<Value = Knapsack> {
    prop::collection::vec((1u32..100, 1u32..60), 1..=8).prop_flat_map(|items| {
        let max_weight: u32 = items.iter().map(|(_, w)| w).sum();
        (Just(items), 0..=max_weight)
    })
    .prop_map(|(items, capacity)| Knapsack {
        values: items.iter().map(|(v, _)| *v as f64).collect(),
        weights: items.iter().map(|(_, w)| *w as f64).collect(),
        capacity: capacity as f64,
    })
}

fn best_packing(problem: &Knapsack) -> f64 {
    let n = problem.values.len();
    let mut best = 0.0_f64;
    for mask in 0u32..(1 << n) {
        let chosen = (0..n).filter(|i| mask & (1 << i) != 0);
        let (value, weight) = chosen.fold((0.0, 0.0), |(v, w), i| {
            (v + problem.values[i], w + problem.weights[i])
        });
        if weight <= problem.capacity {
            best = best.max(value);
        }
    }
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn transportation_meets_demand(problem in transportation()) {
        let solved = solve_with(&problem, "MICROLP").expect("solve");
        prop_assert!(solved.solution.is_optimal());
        prop_assert!(verify(&solved.model, &solved.solution, 1e-6).is_ok());

        let plan = problem.shipments(&solved.handles, &solved.solution).expect("values");
        for (j, (_, demand)) in problem.markets.iter().enumerate() {
            let delivered: f64 = plan.iter().map(|row| row[j]).sum();
            prop_assert!((delivered - demand).abs() < 1e-6);
        }
        for (row, (_, supply)) in plan.iter().zip(&problem.plants) {
            prop_assert!(row.iter().sum::<f64>() <= supply + 1e-6);
        }
    }

    #[test]
    fn transportation_backends_agree(problem in transportation()) {
        let interior = solve(&problem).expect("clarabel");
        let simplex = solve_with(&problem, "MICROLP").expect("microlp");
        let a = interior.solution.objective_value().expect("value");
        let b = simplex.solution.objective_value().expect("value");
        prop_assert!((a - b).abs() <= 1e-4 * (1.0 + b.abs()), "{} vs {}", a, b);
    }

    #[test]
    fn knapsack_matches_enumeration(problem in knapsack()) {
        let solved = solve(&problem).expect("solve");
        let value = solved.solution.objective_value().expect("value");
        prop_assert!((value - best_packing(&problem)).abs() < 1e-6);

        let packed = problem.packed(&solved.handles, &solved.solution).expect("values");
        let weight: f64 = packed.iter().map(|&i| problem.weights[i]).sum();
        prop_assert!(weight <= problem.capacity + 1e-9);
    }

    #[test]
    fn coin_change_pays_exact_amount(amount in 1u32..150) {
        let problem = CoinChange { amount, ..Default::default() };
        let solved = solve(&problem).expect("solve");
        let counts = problem.counts(&solved.handles, &solved.solution).expect("values");
        let paid: u32 = counts.iter().zip(&problem.coins).map(|(n, c)| n * c).sum();
        prop_assert_eq!(paid, amount);
    }
}

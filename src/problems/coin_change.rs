//! Coin change.
//!
//! Pay exactly 63 cents with as few coins as possible, using coins of 1, 5,
//! 10, 21 and 25 cents. Greedy change-making gives 25+25+10+1+1+1 (six
//! coins); the optimum is three 21s.
//!
//! ```text
//! minimize    sum_k n[k]
//! subject to  sum_k value[k] * n[k] = amount
//!             0 <= n[k] <= supply[k], integer
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{dot, sum, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

#[derive(Debug, Clone)]
pub struct CoinChange {
    /// Coin values in cents.
    pub coins: Vec<u32>,
    pub amount: u32,
    /// Optional limit on the number of coins of each value.
    pub supply: Option<Vec<u32>>,
}

impl Default for CoinChange {
    fn default() -> Self {
        CoinChange {
            coins: vec![1, 5, 10, 21, 25],
            amount: 63,
            supply: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoinVars {
    pub counts: Vec<Variable>,
}

impl CoinChange {
    /// Number of coins used of each value.
    pub fn counts(&self, vars: &CoinVars, solution: &Solution) -> Result<Vec<u32>> {
        Ok(solution
            .values(&vars.counts)?
            .into_iter()
            .map(|x| x.round().max(0.0) as u32)
            .collect())
    }

    fn upper_bound(&self, k: usize) -> f64 {
        let most = self.amount / self.coins[k];
        let limit = self
            .supply
            .as_ref()
            .and_then(|s| s.get(k).copied())
            .unwrap_or(most);
        most.min(limit) as f64
    }
}

impl Formulation for CoinChange {
    const NAME: &'static str = "coin_change";
    const BACKEND: &'static str = "CP-SAT";
    type Handles = CoinVars;

    fn formulate(&self) -> Result<(Model, CoinVars)> {
        if self.coins.contains(&0) {
            return Err(FormularyError::InvalidModel("zero-valued coin".into()));
        }
        if let Some(supply) = &self.supply {
            check_len("coin supply", supply.len(), self.coins.len())?;
        }
        let mut model = Model::new(Self::NAME);
        let counts: Vec<Variable> = self
            .coins
            .iter()
            .enumerate()
            .map(|(k, c)| model.int_var(0.0, self.upper_bound(k), format!("{c}c")))
            .collect();

        let values: Vec<f64> = self.coins.iter().map(|&c| c as f64).collect();
        model.add_constraint(
            dot(&values, &counts)
                .equals(self.amount as f64)
                .named("amount"),
        );
        model.minimize(sum(counts.iter()));
        Ok((model, CoinVars { counts }))
    }

    fn report(&self, vars: &CoinVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Coin change", solution).objective_label("Coins");
        for (coin, n) in self.coins.iter().zip(self.counts(vars, solution)?) {
            if n > 0 {
                report.line(format!("{n} x {coin}c"));
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::solve;

    fn fewest_coins(coins: &[u32], amount: u32) -> Option<u32> {
        let mut best = vec![None; amount as usize + 1];
        best[0] = Some(0);
        for a in 1..=amount as usize {
            best[a] = coins
                .iter()
                .filter(|&&c| c as usize <= a)
                .filter_map(|&c| best[a - c as usize].map(|n: u32| n + 1))
                .min();
        }
        best[amount as usize]
    }

    #[test]
    fn test_beats_greedy() {
        let problem = CoinChange::default();
        let solved = solve(&problem).expect("solve failed");
        let coins = solved.solution.objective_value().expect("no value");
        assert_eq!(fewest_coins(&problem.coins, problem.amount), Some(3));
        assert!((coins - 3.0).abs() < 1e-6);

        let counts = problem.counts(&solved.handles, &solved.solution).expect("values");
        let paid: u32 = counts.iter().zip(&problem.coins).map(|(n, c)| n * c).sum();
        assert_eq!(paid, problem.amount);
    }

    #[test]
    fn test_limited_supply() {
        let problem = CoinChange {
            supply: Some(vec![10, 10, 10, 1, 10]),
            ..Default::default()
        };
        let solved = solve(&problem).expect("solve failed");
        let counts = problem.counts(&solved.handles, &solved.solution).expect("values");
        assert!(counts[3] <= 1);
        // 25 + 25 + 10 + 1 + 1 + 1
        assert!((solved.solution.objective_value().expect("no value") - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_unpayable_amount() {
        let problem = CoinChange {
            coins: vec![5, 10],
            amount: 7,
            supply: None,
        };
        let solved = solve(&problem).expect("solve failed");
        assert!(!solved.solution.status.has_solution());
    }

    #[test]
    fn test_supply_shape_checked() {
        let problem = CoinChange {
            supply: Some(vec![1, 1]),
            ..Default::default()
        };
        assert!(matches!(
            problem.formulate(),
            Err(FormularyError::InvalidModel(_))
        ));
    }
}

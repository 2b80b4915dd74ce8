//! Alloy blending.
//!
//! A foundry must cast a 100 kg batch of an alloy containing 28-32% lead,
//! 28-32% zinc and 38-42% tin. Nine purchasable alloys with known
//! composition and price per kg can be melted together. Which mix is
//! cheapest?
//!
//! ```text
//! minimize    sum_a price[a] * x[a]
//! subject to  sum_a x[a] = batch
//!             low[m] * batch <= sum_a share[a][m] * x[a] <= high[m] * batch
//!             x[a] >= 0
//! ```

use crate::constraints::ConstraintExt;
use crate::error::Result;
use crate::expr::{dot, sum, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

/// A metal with the allowed share range in the final blend.
#[derive(Debug, Clone)]
pub struct Metal {
    pub name: &'static str,
    pub low: f64,
    pub high: f64,
}

/// A purchasable alloy.
#[derive(Debug, Clone)]
pub struct Alloy {
    pub name: String,
    /// Price per kg.
    pub price: f64,
    /// Share of each metal, in the order of `Blending::metals`.
    pub shares: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Blending {
    /// Batch size in kg.
    pub batch: f64,
    pub metals: Vec<Metal>,
    pub alloys: Vec<Alloy>,
}

impl Default for Blending {
    fn default() -> Self {
        // (lead, zinc, tin) percentages and price per kg
        let table: [([f64; 3], f64); 9] = [
            ([20.0, 30.0, 50.0], 7.3),
            ([50.0, 40.0, 10.0], 6.9),
            ([30.0, 20.0, 50.0], 7.3),
            ([30.0, 40.0, 30.0], 7.5),
            ([30.0, 30.0, 40.0], 7.6),
            ([60.0, 30.0, 10.0], 6.0),
            ([40.0, 50.0, 10.0], 5.8),
            ([10.0, 30.0, 60.0], 4.3),
            ([10.0, 10.0, 80.0], 4.1),
        ];
        Blending {
            batch: 100.0,
            metals: vec![
                Metal {
                    name: "lead",
                    low: 0.28,
                    high: 0.32,
                },
                Metal {
                    name: "zinc",
                    low: 0.28,
                    high: 0.32,
                },
                Metal {
                    name: "tin",
                    low: 0.38,
                    high: 0.42,
                },
            ],
            alloys: table
                .iter()
                .enumerate()
                .map(|(i, (pct, price))| Alloy {
                    name: format!("alloy {}", i + 1),
                    price: *price,
                    shares: pct.iter().map(|p| p / 100.0).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlendVars {
    /// Kilograms bought of each alloy.
    pub amounts: Vec<Variable>,
}

impl Blending {
    /// Kilograms of each metal in the blend.
    pub fn composition(&self, vars: &BlendVars, solution: &Solution) -> Result<Vec<f64>> {
        let amounts = solution.values(&vars.amounts)?;
        Ok((0..self.metals.len())
            .map(|m| {
                self.alloys
                    .iter()
                    .zip(&amounts)
                    .map(|(a, x)| a.shares[m] * x)
                    .sum()
            })
            .collect())
    }
}

impl Formulation for Blending {
    const NAME: &'static str = "blending";
    const BACKEND: &'static str = "GLOP";
    type Handles = BlendVars;

    fn formulate(&self) -> Result<(Model, BlendVars)> {
        for alloy in &self.alloys {
            check_len(
                format_args!("shares of {}", alloy.name),
                alloy.shares.len(),
                self.metals.len(),
            )?;
        }
        let mut model = Model::new(Self::NAME);
        let amounts: Vec<Variable> = self
            .alloys
            .iter()
            .map(|a| model.num_var(0.0, f64::INFINITY, a.name.clone()))
            .collect();

        model.add_constraint(sum(amounts.iter()).equals(self.batch).named("batch"));
        for (m, metal) in self.metals.iter().enumerate() {
            let shares: Vec<f64> = self.alloys.iter().map(|a| a.shares[m]).collect();
            let content = dot(&shares, &amounts);
            model.add_constraint(
                (&content)
                    .geq(metal.low * self.batch)
                    .named(format!("{} min", metal.name)),
            );
            model.add_constraint(
                content
                    .leq(metal.high * self.batch)
                    .named(format!("{} max", metal.name)),
            );
        }

        let prices: Vec<f64> = self.alloys.iter().map(|a| a.price).collect();
        model.minimize(dot(&prices, &amounts));
        Ok((model, BlendVars { amounts }))
    }

    fn report(&self, vars: &BlendVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Alloy blending", solution).objective_label("Batch cost");
        for (alloy, kg) in self.alloys.iter().zip(solution.values(&vars.amounts)?) {
            if kg > 1e-6 {
                report.line(format!("{:<8} {:>8.3} kg", alloy.name, kg));
            }
        }
        for (metal, kg) in self.metals.iter().zip(self.composition(vars, solution)?) {
            report.line(format!(
                "{:<8} {:>7.2}%",
                metal.name,
                100.0 * kg / self.batch
            ));
        }
        Ok(report)
    }
}

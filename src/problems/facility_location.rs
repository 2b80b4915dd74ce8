//! Capacitated facility location.
//!
//! A retailer may open any of three warehouses, each with a fixed opening
//! cost and a capacity. Five stores must each be served by exactly one open
//! warehouse, at a known cost per pairing. Which warehouses should open and
//! who serves whom?
//!
//! ```text
//! minimize    sum_f fixed[f] * open[f] + sum_cf cost[c][f] * serve[c][f]
//! subject to  sum_f serve[c][f] = 1                           for each store c
//!             serve[c][f] <= open[f]
//!             sum_c demand[c] * serve[c][f] <= capacity[f] * open[f]
//!             open, serve binary
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{dot, sum, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::{check_len, Formulation};

#[derive(Debug, Clone)]
pub struct Warehouse {
    pub name: &'static str,
    pub fixed_cost: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone)]
pub struct Store {
    pub name: &'static str,
    pub demand: f64,
    /// Cost of serving this store from each warehouse.
    pub costs: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct FacilityLocation {
    pub warehouses: Vec<Warehouse>,
    pub stores: Vec<Store>,
}

impl Default for FacilityLocation {
    fn default() -> Self {
        let warehouse = |name, fixed_cost, capacity| Warehouse {
            name,
            fixed_cost,
            capacity,
        };
        let store = |name, demand, costs: [f64; 3]| Store {
            name,
            demand,
            costs: costs.to_vec(),
        };
        FacilityLocation {
            warehouses: vec![
                warehouse("north", 100.0, 80.0),
                warehouse("central", 120.0, 90.0),
                warehouse("south", 90.0, 70.0),
            ],
            stores: vec![
                store("harbor", 20.0, [12.0, 25.0, 40.0]),
                store("market", 30.0, [30.0, 10.0, 28.0]),
                store("mill", 25.0, [45.0, 18.0, 14.0]),
                store("station", 35.0, [20.0, 15.0, 35.0]),
                store("bridge", 15.0, [38.0, 22.0, 9.0]),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteVars {
    pub open: Vec<Variable>,
    /// `serve[store][warehouse]`.
    pub serve: Vec<Vec<Variable>>,
}

/// Decoded plan: which warehouses open and who serves each store.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePlan {
    pub open: Vec<bool>,
    /// Serving warehouse per store.
    pub served_by: Vec<usize>,
}

impl FacilityLocation {
    pub fn plan(&self, vars: &SiteVars, solution: &Solution) -> Result<SitePlan> {
        let open = solution
            .values(&vars.open)?
            .into_iter()
            .map(|x| x > 0.5)
            .collect();
        let mut served_by = Vec::with_capacity(vars.serve.len());
        for row in &vars.serve {
            let values = solution.values(row)?;
            let f = values.iter().position(|x| *x > 0.5).ok_or_else(|| {
                FormularyError::NumericalError("store served by no warehouse".into())
            })?;
            served_by.push(f);
        }
        Ok(SitePlan { open, served_by })
    }

    /// Total cost of a plan, recomputed from the data.
    pub fn cost(&self, plan: &SitePlan) -> f64 {
        let fixed: f64 = self
            .warehouses
            .iter()
            .zip(&plan.open)
            .filter(|(_, open)| **open)
            .map(|(w, _)| w.fixed_cost)
            .sum();
        let service: f64 = self
            .stores
            .iter()
            .zip(&plan.served_by)
            .map(|(s, &f)| s.costs[f])
            .sum();
        fixed + service
    }
}

impl Formulation for FacilityLocation {
    const NAME: &'static str = "facility_location";
    const BACKEND: &'static str = "SCIP";
    type Handles = SiteVars;

    fn formulate(&self) -> Result<(Model, SiteVars)> {
        for store in &self.stores {
            check_len(
                format_args!("costs of {}", store.name),
                store.costs.len(),
                self.warehouses.len(),
            )?;
        }
        let mut model = Model::new(Self::NAME);
        let open: Vec<Variable> = self
            .warehouses
            .iter()
            .map(|w| model.bool_var(format!("open {}", w.name)))
            .collect();
        let serve: Vec<Vec<Variable>> = self
            .stores
            .iter()
            .map(|s| {
                self.warehouses
                    .iter()
                    .map(|w| model.bool_var(format!("{} from {}", s.name, w.name)))
                    .collect()
            })
            .collect();

        for (store, row) in self.stores.iter().zip(&serve) {
            model.add_constraint(sum(row.iter()).equals(1.0).named(store.name));
            for (&x, &y) in row.iter().zip(&open) {
                model.add_constraint(x.leq(y));
            }
        }
        let demands: Vec<f64> = self.stores.iter().map(|s| s.demand).collect();
        for (f, warehouse) in self.warehouses.iter().enumerate() {
            let column: Vec<Variable> = serve.iter().map(|row| row[f]).collect();
            model.add_constraint(
                dot(&demands, &column)
                    .leq(warehouse.capacity * open[f])
                    .named(format!("capacity {}", warehouse.name)),
            );
        }

        let fixed: Vec<f64> = self.warehouses.iter().map(|w| w.fixed_cost).collect();
        let mut cost = dot(&fixed, &open);
        for (store, row) in self.stores.iter().zip(&serve) {
            cost += dot(&store.costs, row);
        }
        model.minimize(cost);
        Ok((model, SiteVars { open, serve }))
    }

    fn report(&self, vars: &SiteVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Facility location", solution).objective_label("Total cost");
        let plan = self.plan(vars, solution)?;
        for (f, warehouse) in self.warehouses.iter().enumerate() {
            if !plan.open[f] {
                continue;
            }
            let served: Vec<&Store> = self
                .stores
                .iter()
                .zip(&plan.served_by)
                .filter(|(_, &by)| by == f)
                .map(|(s, _)| s)
                .collect();
            let load: f64 = served.iter().map(|s| s.demand).sum();
            let names: Vec<&str> = served.iter().map(|s| s.name).collect();
            report.line(format!(
                "{} ({load} of {}) serves {}",
                warehouse.name,
                warehouse.capacity,
                names.join(", ")
            ));
        }
        Ok(report)
    }
}

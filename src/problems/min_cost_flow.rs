//! Minimum cost flow.
//!
//! Node 0 holds 20 units of supply. Node 3 needs 5 units and node 4 needs
//! 15. Arcs have capacities and per-unit costs. Route the supply at least
//! total cost.
//!
//! ```text
//! minimize    sum_a cost[a] * f[a]
//! subject to  outflow(v) - inflow(v) = supply[v]   for every node
//!             0 <= f[a] <= capacity[a]
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::LinExpr;
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::max_flow::{flow_vars, net_outflow, Arc, FlowVars};
use super::Formulation;

#[derive(Debug, Clone)]
pub struct MinCostFlow {
    pub arcs: Vec<Arc>,
    /// Net supply per node; demands are negative.
    pub supplies: Vec<f64>,
}

impl Default for MinCostFlow {
    fn default() -> Self {
        let arcs = [
            (0, 1, 15.0, 4.0),
            (0, 2, 8.0, 4.0),
            (1, 2, 20.0, 2.0),
            (1, 3, 4.0, 2.0),
            (1, 4, 10.0, 6.0),
            (2, 3, 15.0, 1.0),
            (2, 4, 4.0, 3.0),
            (3, 4, 20.0, 2.0),
            (4, 2, 5.0, 3.0),
        ];
        MinCostFlow {
            arcs: arcs
                .iter()
                .map(|&(u, v, cap, cost)| Arc::new(u, v, cap).with_cost(cost))
                .collect(),
            supplies: vec![20.0, 0.0, 0.0, -5.0, -15.0],
        }
    }
}

impl MinCostFlow {
    pub fn flows(&self, vars: &FlowVars, solution: &Solution) -> Result<Vec<f64>> {
        solution.values(&vars.flows)
    }
}

impl Formulation for MinCostFlow {
    const NAME: &'static str = "min_cost_flow";
    const BACKEND: &'static str = "GLOP";
    type Handles = FlowVars;

    fn formulate(&self) -> Result<(Model, FlowVars)> {
        let imbalance: f64 = self.supplies.iter().sum();
        if imbalance.abs() > 1e-9 {
            return Err(FormularyError::InvalidModel(format!(
                "supplies and demands differ by {imbalance}"
            )));
        }
        let mut model = Model::new(Self::NAME);
        let flows = flow_vars(&mut model, &self.arcs, self.supplies.len())?;

        for (node, supply) in self.supplies.iter().enumerate() {
            model.add_constraint(
                net_outflow(&self.arcs, &flows, node)
                    .equals(*supply)
                    .named(format!("balance {node}")),
            );
        }

        let mut cost = LinExpr::zero();
        for (arc, &f) in self.arcs.iter().zip(&flows) {
            cost.add_term(f, arc.cost);
        }
        model.minimize(cost);
        Ok((model, FlowVars { flows }))
    }

    fn report(&self, vars: &FlowVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Min cost flow", solution).objective_label("Minimum cost");
        report.line("  Arc    Flow / Capacity  Cost");
        for (arc, flow) in self.arcs.iter().zip(self.flows(vars, solution)?) {
            report.line(format!(
                "{:>2} -> {:<2} {:>5.1} / {:>5.1}  {:>5.1}",
                arc.from,
                arc.to,
                flow,
                arc.capacity,
                flow * arc.cost
            ));
        }
        Ok(report)
    }
}

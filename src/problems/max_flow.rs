//! Maximum flow.
//!
//! A pipeline network of five stations with capacitated arcs. How much
//! can be pumped from station 0 to station 4?
//!
//! ```text
//! maximize    sum_{(s,j)} f[s,j] - sum_{(j,s)} f[j,s]
//! subject to  inflow(v) = outflow(v)   for every node other than s, t
//!             0 <= f[a] <= capacity[a]
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{LinExpr, Variable};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

/// A directed arc with a capacity, and for cost flows a unit cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub from: usize,
    pub to: usize,
    pub capacity: f64,
    pub cost: f64,
}

impl Arc {
    pub fn new(from: usize, to: usize, capacity: f64) -> Self {
        Arc {
            from,
            to,
            capacity,
            cost: 0.0,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

/// Net outflow of `node`: flow leaving minus flow entering.
pub(crate) fn net_outflow(arcs: &[Arc], flows: &[Variable], node: usize) -> LinExpr {
    let mut expr = LinExpr::zero();
    for (arc, &f) in arcs.iter().zip(flows) {
        if arc.from == node {
            expr.add_term(f, 1.0);
        }
        if arc.to == node {
            expr.add_term(f, -1.0);
        }
    }
    expr
}

/// Declare one flow variable per arc, bounded by its capacity.
pub(crate) fn flow_vars(
    model: &mut Model,
    arcs: &[Arc],
    num_nodes: usize,
) -> Result<Vec<Variable>> {
    arcs.iter()
        .map(|arc| {
            if arc.from >= num_nodes || arc.to >= num_nodes {
                return Err(FormularyError::InvalidModel(format!(
                    "arc {}->{} leaves the {num_nodes}-node graph",
                    arc.from, arc.to
                )));
            }
            Ok(model.num_var(0.0, arc.capacity, format!("flow {}->{}", arc.from, arc.to)))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MaxFlow {
    pub num_nodes: usize,
    pub arcs: Vec<Arc>,
    pub source: usize,
    pub sink: usize,
}

impl Default for MaxFlow {
    fn default() -> Self {
        let arcs = [
            (0, 1, 20.0),
            (0, 2, 30.0),
            (0, 3, 10.0),
            (1, 2, 40.0),
            (1, 4, 30.0),
            (2, 3, 10.0),
            (2, 4, 20.0),
            (3, 2, 5.0),
            (3, 4, 20.0),
        ];
        MaxFlow {
            num_nodes: 5,
            arcs: arcs.iter().map(|&(u, v, c)| Arc::new(u, v, c)).collect(),
            source: 0,
            sink: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlowVars {
    /// Flow per arc, in the order of the arc list.
    pub flows: Vec<Variable>,
}

impl MaxFlow {
    pub fn flows(&self, vars: &FlowVars, solution: &Solution) -> Result<Vec<f64>> {
        solution.values(&vars.flows)
    }
}

impl Formulation for MaxFlow {
    const NAME: &'static str = "max_flow";
    const BACKEND: &'static str = "GLOP";
    type Handles = FlowVars;

    fn formulate(&self) -> Result<(Model, FlowVars)> {
        if self.source == self.sink {
            return Err(FormularyError::InvalidModel(
                "source and sink must differ".into(),
            ));
        }
        let mut model = Model::new(Self::NAME);
        let flows = flow_vars(&mut model, &self.arcs, self.num_nodes)?;

        for node in (0..self.num_nodes).filter(|&v| v != self.source && v != self.sink) {
            model.add_constraint(
                net_outflow(&self.arcs, &flows, node)
                    .equals(0.0)
                    .named(format!("node {node}")),
            );
        }

        model.maximize(net_outflow(&self.arcs, &flows, self.source));
        Ok((model, FlowVars { flows }))
    }

    fn report(&self, vars: &FlowVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Max flow", solution).objective_label("Max flow");
        report.line("  Arc    Flow / Capacity");
        for (arc, flow) in self.arcs.iter().zip(self.flows(vars, solution)?) {
            report.line(format!(
                "{:>2} -> {:<2} {:>5.1} / {:>5.1}",
                arc.from, arc.to, flow, arc.capacity
            ));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::solve;

    /// Smallest cut capacity over every source side containing the source.
    fn min_cut(problem: &MaxFlow) -> f64 {
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << problem.num_nodes) {
            let inside = |v: usize| mask & (1 << v) != 0;
            if !inside(problem.source) || inside(problem.sink) {
                continue;
            }
            let cut: f64 = problem
                .arcs
                .iter()
                .filter(|a| inside(a.from) && !inside(a.to))
                .map(|a| a.capacity)
                .sum();
            best = best.min(cut);
        }
        best
    }

    #[test]
    fn test_flow_equals_min_cut() {
        let problem = MaxFlow::default();
        let solved = solve(&problem).expect("solve failed");
        let flow = solved.solution.objective_value().expect("no value");
        assert!((min_cut(&problem) - 60.0).abs() < 1e-9);
        assert!((flow - 60.0).abs() < 1e-4, "Expected 60, got {}", flow);
    }

    #[test]
    fn test_arc_outside_graph() {
        let mut problem = MaxFlow::default();
        problem.arcs.push(Arc::new(2, 9, 1.0));
        assert!(solve(&problem).is_err());
    }
}

//! Team selection with pairwise synergies.
//!
//! A manager picks exactly four of seven candidates. Each candidate has a
//! skill rating and a salary, and the payroll must stay within budget.
//! Some pairs work especially well together and earn a bonus when both are
//! picked; one pair refuses to work together. Maximize total rating.
//!
//! ```text
//! maximize    sum_i skill[i] * x[i] + sum_(i,j) bonus[i,j] * z[i,j]
//! subject to  z[i,j] = x[i] * x[j]             (linearized)
//!             sum_i x[i] = size
//!             sum_i salary[i] * x[i] <= budget
//!             x[i] = 1  =>  x[j] <= 0          for each conflict (i, j)
//!             x, z binary
//! ```

use crate::constraints::ConstraintExt;
use crate::error::{FormularyError, Result};
use crate::expr::{dot, sum, Variable};
use crate::linearize::{binary_product, implies};
use crate::model::Model;
use crate::report::Report;
use crate::solver::Solution;

use super::Formulation;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: &'static str,
    pub skill: f64,
    pub salary: f64,
}

#[derive(Debug, Clone)]
pub struct TeamSelection {
    pub candidates: Vec<Candidate>,
    pub size: usize,
    pub budget: f64,
    /// `(i, j, bonus)` earned when both i and j are picked.
    pub synergies: Vec<(usize, usize, f64)>,
    /// Pairs that cannot both be picked.
    pub conflicts: Vec<(usize, usize)>,
}

impl Default for TeamSelection {
    fn default() -> Self {
        let candidate = |name, skill, salary| Candidate {
            name,
            skill,
            salary,
        };
        TeamSelection {
            candidates: vec![
                candidate("ada", 9.0, 50.0),
                candidate("bo", 7.0, 35.0),
                candidate("cy", 6.0, 30.0),
                candidate("di", 8.0, 45.0),
                candidate("ed", 5.0, 20.0),
                candidate("fay", 4.0, 15.0),
                candidate("gus", 7.0, 40.0),
            ],
            size: 4,
            budget: 150.0,
            synergies: vec![(1, 2, 4.0), (4, 5, 3.0), (0, 6, 2.0), (2, 4, 1.5)],
            conflicts: vec![(0, 3)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamVars {
    pub picked: Vec<Variable>,
    /// One product variable per synergy pair.
    pub pairs: Vec<Variable>,
}

impl TeamSelection {
    /// Indices of the picked candidates.
    pub fn team(&self, vars: &TeamVars, solution: &Solution) -> Result<Vec<usize>> {
        Ok(solution
            .values(&vars.picked)?
            .into_iter()
            .enumerate()
            .filter(|(_, x)| *x > 0.5)
            .map(|(i, _)| i)
            .collect())
    }

    /// Rating of a team including synergy bonuses, or `None` if the team
    /// breaks a rule.
    pub fn rating(&self, team: &[usize]) -> Option<f64> {
        let picked = |i: usize| team.contains(&i);
        let salary: f64 = team.iter().map(|&i| self.candidates[i].salary).sum();
        if team.len() != self.size
            || salary > self.budget + 1e-9
            || self.conflicts.iter().any(|&(i, j)| picked(i) && picked(j))
        {
            return None;
        }
        let skill: f64 = team.iter().map(|&i| self.candidates[i].skill).sum();
        let bonus: f64 = self
            .synergies
            .iter()
            .filter(|&&(i, j, _)| picked(i) && picked(j))
            .map(|&(_, _, b)| b)
            .sum();
        Some(skill + bonus)
    }
}

impl Formulation for TeamSelection {
    const NAME: &'static str = "team_selection";
    const BACKEND: &'static str = "CBC";
    type Handles = TeamVars;

    fn formulate(&self) -> Result<(Model, TeamVars)> {
        let n = self.candidates.len();
        let in_range = |&(i, j): &(usize, usize)| i < n && j < n && i != j;
        if !self.synergies.iter().all(|&(i, j, _)| in_range(&(i, j)))
            || !self.conflicts.iter().all(in_range)
        {
            return Err(FormularyError::InvalidModel(
                "pair refers to an unknown candidate".into(),
            ));
        }

        let mut model = Model::new(Self::NAME);
        let picked: Vec<Variable> = self
            .candidates
            .iter()
            .map(|c| model.bool_var(c.name))
            .collect();

        let mut pairs = Vec::with_capacity(self.synergies.len());
        for &(i, j, _) in &self.synergies {
            let name = format!("{}&{}", self.candidates[i].name, self.candidates[j].name);
            pairs.push(binary_product(&mut model, &[picked[i], picked[j]], &name)?);
        }
        for &(i, j) in &self.conflicts {
            implies(&mut model, picked[i], picked[j].leq(0.0), 1.0)?;
        }

        model.add_constraint(sum(picked.iter()).equals(self.size as f64).named("size"));
        let salaries: Vec<f64> = self.candidates.iter().map(|c| c.salary).collect();
        model.add_constraint(dot(&salaries, &picked).leq(self.budget).named("budget"));

        let skills: Vec<f64> = self.candidates.iter().map(|c| c.skill).collect();
        let bonuses: Vec<f64> = self.synergies.iter().map(|&(_, _, b)| b).collect();
        model.maximize(dot(&skills, &picked) + dot(&bonuses, &pairs));
        Ok((model, TeamVars { picked, pairs }))
    }

    fn report(&self, vars: &TeamVars, solution: &Solution) -> Result<Report> {
        let mut report = Report::new("Team selection", solution).objective_label("Team rating");
        let team = self.team(vars, solution)?;
        let mut payroll = 0.0;
        for &i in &team {
            let c = &self.candidates[i];
            payroll += c.salary;
            report.line(format!(
                "{:<4} skill {:>4.1}  salary {:>5.1}",
                c.name, c.skill, c.salary
            ));
        }
        report.line(format!("Payroll: {payroll} of {}", self.budget));
        Ok(report)
    }
}

//! Roster fitness.
//!
//! [`FitnessEvaluator`] sums member valuations and adds four roster-level
//! bonus terms. Rosters that break a constraint are scored
//! [`Fitness::Infeasible`] with the reason attached; higher feasible scores
//! are better and every feasible score outranks every infeasible one.

use crate::context::SearchContext;
use crate::model::{Constraints, Role, Roster, SQUAD_SIZE};
use crate::validation::{ConstraintValidator, Infeasibility};
use crate::valuation::ValuationModel;
use std::cmp::Ordering;
use std::fmt;

const BUDGET_EFFICIENCY_WEIGHT: f64 = 10.0;
const ROLE_BALANCE_WEIGHT: f64 = 20.0;
const FIXTURE_WEIGHT: f64 = 15.0;
const CAPTAINCY_WEIGHT: f64 = 10.0;

/// Season points above which a member counts as a captaincy option.
const CAPTAINCY_THRESHOLD: i32 = 100;
const MAX_DIFFICULTY: f64 = 5.0;

/// Score of a roster, or the reason it cannot be accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fitness {
    Feasible(f64),
    Infeasible(Infeasibility),
}

impl Fitness {
    /// Placeholder for candidates that have not been scored.
    pub fn unevaluated() -> Self {
        Fitness::Infeasible(Infeasibility::NotEvaluated)
    }

    pub fn score(self) -> Option<f64> {
        match self {
            Fitness::Feasible(score) => Some(score),
            Fitness::Infeasible(_) => None,
        }
    }

    pub fn is_feasible(self) -> bool {
        matches!(self, Fitness::Feasible(_))
    }

    /// Total order: feasible scores by value, all infeasible results equal and lowest.
    pub fn compare(&self, other: &Fitness) -> Ordering {
        match (self, other) {
            (Fitness::Feasible(a), Fitness::Feasible(b)) => a.total_cmp(b),
            (Fitness::Feasible(_), Fitness::Infeasible(_)) => Ordering::Greater,
            (Fitness::Infeasible(_), Fitness::Feasible(_)) => Ordering::Less,
            (Fitness::Infeasible(_), Fitness::Infeasible(_)) => Ordering::Equal,
        }
    }

    pub fn is_better_than(&self, other: &Fitness) -> bool {
        self.compare(other) == Ordering::Greater
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fitness::Feasible(score) => write!(f, "{score:.3}"),
            Fitness::Infeasible(reason) => write!(f, "infeasible ({reason})"),
        }
    }
}

/// The components summed into a feasible fitness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessBreakdown {
    pub members: f64,
    pub budget_efficiency: f64,
    pub role_balance: f64,
    pub fixtures: f64,
    pub captaincy: f64,
}

impl FitnessBreakdown {
    pub fn total(&self) -> f64 {
        self.members + self.budget_efficiency + self.role_balance + self.fixtures + self.captaincy
    }
}

/// Pure function of `(Roster, Constraints)` given a fixed [`SearchContext`].
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    valuation: ValuationModel<'a>,
    context: &'a SearchContext,
    validator: ConstraintValidator,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(context: &'a SearchContext) -> Self {
        Self::with_valuation(ValuationModel::new(context), context)
    }

    pub fn with_valuation(valuation: ValuationModel<'a>, context: &'a SearchContext) -> Self {
        Self {
            valuation,
            context,
            validator: ConstraintValidator,
        }
    }

    pub fn valuation(&self) -> &ValuationModel<'a> {
        &self.valuation
    }

    pub fn evaluate(&self, roster: &Roster, constraints: &Constraints) -> Fitness {
        match self.breakdown(roster, constraints) {
            Ok(parts) => Fitness::Feasible(parts.total()),
            Err(reason) => Fitness::Infeasible(reason),
        }
    }

    /// Scores each component separately.
    pub fn breakdown(
        &self,
        roster: &Roster,
        constraints: &Constraints,
    ) -> Result<FitnessBreakdown, Infeasibility> {
        let count = roster.len();
        if count != SQUAD_SIZE {
            return Err(Infeasibility::WrongSize { count });
        }
        let cost = roster.total_cost();
        if cost > constraints.budget {
            return Err(Infeasibility::OverBudget {
                cost,
                budget: constraints.budget,
            });
        }
        self.validator.check_composition(roster)?;

        let members = roster
            .members()
            .map(|m| self.valuation.value(m, constraints))
            .sum();

        Ok(FitnessBreakdown {
            members,
            budget_efficiency: BUDGET_EFFICIENCY_WEIGHT * budget_efficiency(roster, constraints),
            role_balance: ROLE_BALANCE_WEIGHT * role_balance(roster),
            fixtures: FIXTURE_WEIGHT * self.fixture_favorability(roster),
            captaincy: CAPTAINCY_WEIGHT * captaincy_options(roster),
        })
    }

    fn fixture_favorability(&self, roster: &Roster) -> f64 {
        if !self.context.has_fixtures() {
            return 0.0;
        }
        roster
            .members()
            .filter_map(|m| self.context.mean_difficulty(m.organization))
            .map(|difficulty| MAX_DIFFICULTY - difficulty)
            .sum()
    }
}

/// Unspent fraction of the budget.
fn budget_efficiency(roster: &Roster, constraints: &Constraints) -> f64 {
    if constraints.budget <= 0 {
        return 0.0;
    }
    (constraints.budget - roster.total_cost()) as f64 / constraints.budget as f64
}

/// Sum over roles of `1 - |actual cost share - ideal cost share|`.
fn role_balance(roster: &Roster) -> f64 {
    let total = roster.total_cost();
    Role::ALL
        .iter()
        .map(|&role| {
            let actual = if total > 0 {
                roster.role_cost(role) as f64 / total as f64
            } else {
                0.0
            };
            1.0 - (actual - role.ideal_cost_share()).abs()
        })
        .sum()
}

/// Count of high scorers, scaled up when there are several to choose from.
fn captaincy_options(roster: &Roster) -> f64 {
    let count = roster
        .members()
        .filter(|m| m.stats.total_points > CAPTAINCY_THRESHOLD)
        .count();
    let mut score = count as f64;
    if count >= 2 {
        score *= 1.5;
    }
    if count >= 3 {
        score *= 2.0;
    }
    score
}

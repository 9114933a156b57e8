//! Per-member valuation.

use super::predictor::SecondaryPredictor;
use crate::context::SearchContext;
use crate::model::{Constraints, Member, Strategy};

const W_POINTS_PER_GAME: f64 = 0.25;
const W_FORM: f64 = 0.20;
const W_VALUE: f64 = 0.15;
const W_PREDICTION: f64 = 0.30;
const W_DIFFERENTIAL: f64 = 0.10;

const STRATEGY_BOOST: f64 = 1.2;
const DIFFERENTIAL_BOOST: f64 = 1.5;
const DIFFERENTIAL_OWNERSHIP: f64 = 5.0;

/// Scores one member under the active strategy and availability data.
#[derive(Debug, Clone, Copy)]
pub struct ValuationModel<'a> {
    predictor: SecondaryPredictor,
    context: &'a SearchContext,
}

impl<'a> ValuationModel<'a> {
    pub fn new(context: &'a SearchContext) -> Self {
        Self::with_predictor(SecondaryPredictor::default(), context)
    }

    pub fn with_predictor(predictor: SecondaryPredictor, context: &'a SearchContext) -> Self {
        Self { predictor, context }
    }

    pub fn value(&self, member: &Member, constraints: &Constraints) -> f64 {
        let value_for_money = if member.cost > 0 {
            f64::from(member.stats.total_points) / member.cost as f64 * 10.0
        } else {
            0.0
        };

        let base = W_POINTS_PER_GAME * member.points_per_game()
            + W_FORM * member.form
            + W_VALUE * value_for_money
            + W_PREDICTION * self.predictor.predict(member)
            + W_DIFFERENTIAL * (100.0 - member.ownership);

        let available = base * (1.0 - self.availability_penalty(member));
        available * strategy_multiplier(member, constraints.strategy)
    }

    pub fn availability_penalty(&self, member: &Member) -> f64 {
        self.context.availability_of(member).penalty()
    }
}

fn strategy_multiplier(member: &Member, strategy: Strategy) -> f64 {
    match strategy {
        Strategy::Balanced => 1.0,
        Strategy::Aggressive if member.role.is_attacking() => STRATEGY_BOOST,
        Strategy::Defensive if member.role.is_defensive() => STRATEGY_BOOST,
        Strategy::Differential if member.ownership < DIFFERENTIAL_OWNERSHIP => DIFFERENTIAL_BOOST,
        _ => 1.0,
    }
}

//! Member valuation.
//!
//! [`ValuationModel`] blends season statistics, value for money, ownership and
//! a [`SecondaryPredictor`] into one desirability score, then applies the
//! availability penalty and the strategy multiplier.

mod model;
mod predictor;

pub use model::ValuationModel;
pub use predictor::{trend, PredictorWeights, SecondaryPredictor, Trend};

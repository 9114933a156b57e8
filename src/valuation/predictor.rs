//! Fixed-weight linear predictor over normalized season features.

use crate::model::Member;

/// Feature weights of the secondary predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictorWeights {
    pub form: f64,
    pub total_points: f64,
    pub minutes: f64,
    pub goals: f64,
    pub assists: f64,
    pub clean_sheets: f64,
    pub bonus: f64,
    pub influence: f64,
}

impl Default for PredictorWeights {
    fn default() -> Self {
        Self {
            form: 0.30,
            total_points: 0.20,
            minutes: 0.15,
            goals: 0.10,
            assists: 0.10,
            clean_sheets: 0.05,
            bonus: 0.05,
            influence: 0.05,
        }
    }
}

// Normalization denominators: a full season of fixtures and minutes, and
// practical season maxima for the counting statistics.
const SEASON_FIXTURES: f64 = 38.0;
const SEASON_MINUTES: f64 = 3420.0;
const MAX_GOALS: f64 = 30.0;
const MAX_ASSISTS: f64 = 20.0;
const MAX_CLEAN_SHEETS: f64 = 20.0;
const MAX_BONUS: f64 = 100.0;
const MAX_INFLUENCE: f64 = 1000.0;

const TREND_THRESHOLD: f64 = 0.2;
const TREND_EFFECT: f64 = 0.1;

/// Direction of recent form relative to the season average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    fn factor(self) -> f64 {
        match self {
            Trend::Rising => 1.0 + TREND_EFFECT,
            Trend::Stable => 1.0,
            Trend::Falling => 1.0 - TREND_EFFECT,
        }
    }
}

/// Secondary expected-desirability predictor, clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondaryPredictor {
    weights: PredictorWeights,
}

impl SecondaryPredictor {
    pub fn new(weights: PredictorWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &PredictorWeights {
        &self.weights
    }

    pub fn predict(&self, member: &Member) -> f64 {
        let w = &self.weights;
        let s = &member.stats;
        let linear = w.form * member.form
            + w.total_points * f64::from(s.total_points) / SEASON_FIXTURES
            + w.minutes * f64::from(s.minutes) / SEASON_MINUTES
            + w.goals * f64::from(s.goals) / MAX_GOALS
            + w.assists * f64::from(s.assists) / MAX_ASSISTS
            + w.clean_sheets * f64::from(s.clean_sheets) / MAX_CLEAN_SHEETS
            + w.bonus * f64::from(s.bonus) / MAX_BONUS
            + w.influence * s.influence / MAX_INFLUENCE;

        let prediction =
            linear * trend(member).factor() * member.role.prediction_multiplier();
        prediction.clamp(0.0, 100.0)
    }
}

/// Classifies recent form against points per game with a 20% band.
pub fn trend(member: &Member) -> Trend {
    let season_avg = member.points_per_game();
    if member.form > season_avg * (1.0 + TREND_THRESHOLD) {
        Trend::Rising
    } else if member.form < season_avg * (1.0 - TREND_THRESHOLD) {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, SeasonStats};

    fn midfielder() -> Member {
        Member::new(1, Role::Midfielder, 1, 80)
            .with_form(5.0)
            .with_stats(SeasonStats {
                total_points: 100,
                starts: 20,
                minutes: 1710,
                goals: 6,
                assists: 4,
                clean_sheets: 2,
                bonus: 10,
                influence: 500.0,
            })
    }

    #[test]
    fn test_linear_combination_stable_trend() {
        // ppg = 5.0 and form = 5.0, so the trend factor is 1.
        let m = midfielder();
        assert_eq!(trend(&m), Trend::Stable);
        let expected = 0.30 * 5.0
            + 0.20 * 100.0 / 38.0
            + 0.15 * 0.5
            + 0.10 * 0.2
            + 0.10 * 0.2
            + 0.05 * 0.1
            + 0.05 * 0.1
            + 0.05 * 0.5;
        let got = SecondaryPredictor::default().predict(&m);
        assert!((got - expected).abs() < 1e-9, "got {got}, expected {expected}");
    }

    #[test]
    fn test_trend_scales_prediction() {
        let base = midfielder();
        let rising = base.clone().with_form(7.0);
        let falling = base.clone().with_form(3.0);
        assert_eq!(trend(&rising), Trend::Rising);
        assert_eq!(trend(&falling), Trend::Falling);

        let p = SecondaryPredictor::default();
        let delta_form = |form: f64| 0.30 * form;
        let rest = p.predict(&base) - delta_form(5.0);
        assert!((p.predict(&rising) - (rest + delta_form(7.0)) * 1.1).abs() < 1e-9);
        assert!((p.predict(&falling) - (rest + delta_form(3.0)) * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_role_multiplier() {
        let mid = midfielder();
        let mut gk = mid.clone();
        gk.role = Role::Goalkeeper;
        let p = SecondaryPredictor::default();
        assert!((p.predict(&gk) - p.predict(&mid) * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_to_range() {
        let p = SecondaryPredictor::default();
        let huge = midfielder().with_form(1000.0);
        assert_eq!(p.predict(&huge), 100.0);
        let negative = midfielder().with_form(-50.0).with_total_points(-10);
        assert_eq!(p.predict(&negative), 0.0);
    }
}

//! SA configuration.

use crate::error::RosterError;
use crate::model::Cost;

/// Configuration for the annealing search.
///
/// Temperature starts at `initial_temperature` and is multiplied by
/// `cooling_rate` after every iteration; the search stops once it is no
/// longer above `min_temperature`.
///
/// # Examples
///
/// ```
/// use u_roster::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.98)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.planned_iterations(), 308);
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature. Higher values accept more worsening moves early on.
    pub initial_temperature: f64,

    /// The loop runs while the temperature is strictly above this value.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = cooling_rate * T_k`.
    pub cooling_rate: f64,

    /// Maximum cost difference for a replacement move, in cost tenths.
    pub neighbor_cost_tolerance: Cost,

    /// Probability that a neighbor move swaps two same-role slots instead of
    /// replacing one member.
    pub swap_probability: f64,

    /// Attempts at a feasible starting roster before accepting an infeasible one.
    pub initial_attempts: usize,

    /// Hard cap on iterations. `None` lets the cooling schedule decide.
    pub max_iterations: Option<usize>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            min_temperature: 1.0,
            cooling_rate: 0.95,
            neighbor_cost_tolerance: 15,
            swap_probability: 0.5,
            initial_attempts: 32,
            max_iterations: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_neighbor_cost_tolerance(mut self, tolerance: Cost) -> Self {
        self.neighbor_cost_tolerance = tolerance;
        self
    }

    pub fn with_swap_probability(mut self, p: f64) -> Self {
        self.swap_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_initial_attempts(mut self, n: usize) -> Self {
        self.initial_attempts = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of iterations the cooling schedule allows, ignoring `max_iterations`.
    ///
    /// The smallest `k` with `initial * rate^k <= min`, i.e.
    /// `ceil(ln(min / initial) / ln(rate))`. Only meaningful for a valid config.
    pub fn planned_iterations(&self) -> usize {
        let mut temperature = self.initial_temperature;
        let mut k = 0;
        while temperature > self.min_temperature {
            temperature *= self.cooling_rate;
            k += 1;
        }
        k
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RosterError> {
        if !(self.initial_temperature > 0.0) {
            return Err(RosterError::config("initial_temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(RosterError::config("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(RosterError::config(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(RosterError::config(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.swap_probability) {
            return Err(RosterError::config(format!(
                "swap_probability must be in [0, 1], got {}",
                self.swap_probability
            )));
        }
        if self.neighbor_cost_tolerance < 0 {
            return Err(RosterError::config(
                "neighbor_cost_tolerance must be non-negative",
            ));
        }
        if self.initial_attempts == 0 {
            return Err(RosterError::config("initial_attempts must be at least 1"));
        }
        Ok(())
    }
}

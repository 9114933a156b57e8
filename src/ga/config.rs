//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::RosterError;
use crate::model::Cost;

/// Configuration for the genetic search.
///
/// # Defaults
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 50);
/// assert_eq!(config.elite_size, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_roster::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_selection(Selection::Tournament(3))
///     .with_elite_size(6)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Selection strategy used to fill the parent pool.
    pub selection: Selection,

    /// Number of top individuals copied unchanged into the next generation.
    pub elite_size: usize,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Maximum cost difference between a replaced member and its replacement,
    /// in cost tenths.
    pub mutation_cost_tolerance: Cost,

    /// Whether to evaluate offspring in parallel (requires the `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked between generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 50,
            selection: Selection::default(),
            elite_size: 20,
            mutation_rate: 0.1,
            mutation_cost_tolerance: 10,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_cost_tolerance(mut self, tolerance: Cost) -> Self {
        self.mutation_cost_tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.population_size < 2 {
            return Err(RosterError::config("population_size must be at least 2"));
        }
        if self.generations == 0 {
            return Err(RosterError::config("generations must be at least 1"));
        }
        if self.elite_size >= self.population_size {
            return Err(RosterError::config(
                "elite_size too high: elites fill entire population",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(RosterError::config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(RosterError::config("tournament size must be at least 1"));
        }
        if self.mutation_cost_tolerance < 0 {
            return Err(RosterError::config(
                "mutation_cost_tolerance must be non-negative",
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(RosterError::config("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

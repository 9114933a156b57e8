//! Public entry point.
//!
//! [`RosterOptimizer`] owns the auxiliary search context, the engine
//! configurations and the progress subscribers. Each run checks the pool
//! and constraints up front, searches, and returns the best feasible roster
//! found or says why there is none.
//!
//! # Example
//!
//! ```
//! use u_roster::ga::GaConfig;
//! use u_roster::model::{Constraints, Member, Role, Strategy};
//! use u_roster::RosterOptimizer;
//!
//! let mut pool = Vec::new();
//! let mut id = 0;
//! for role in Role::ALL {
//!     for k in 0..8u32 {
//!         id += 1;
//!         pool.push(Member::new(id, role, k, 45).with_total_points(30 + k as i32));
//!     }
//! }
//!
//! let optimizer = RosterOptimizer::new().with_ga_config(
//!     GaConfig::default()
//!         .with_population_size(20)
//!         .with_generations(5)
//!         .with_elite_size(4)
//!         .with_seed(1),
//! );
//! let outcome = optimizer
//!     .run_genetic_search(&pool, Constraints::new(1000, Strategy::Balanced))
//!     .unwrap();
//! assert_eq!(outcome.roster.len(), 15);
//! ```

use crate::context::SearchContext;
use crate::error::RosterError;
use crate::fitness::{Fitness, FitnessEvaluator};
use crate::ga::{GaConfig, GaRunner};
use crate::model::{
    Availability, Constraints, Member, MemberId, OrganizationId, Role, RolePool, Roster,
    MAX_PER_ORGANIZATION, SQUAD_SIZE,
};
use crate::problem::RosterProblem;
use crate::progress::{Broadcast, ChannelReporter, ProgressEvent, ProgressReporter};
use crate::sa::{SaConfig, SaRunner};
use crate::valuation::{SecondaryPredictor, ValuationModel};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

/// The best roster of a finished run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Always satisfies every roster constraint.
    pub roster: Roster,
    pub score: f64,
    /// Generations or iterations completed.
    pub steps: usize,
    /// The run stopped early on request; `roster` is the best found until then.
    pub cancelled: bool,
}

/// Runs genetic search or simulated annealing over a candidate pool.
#[derive(Debug, Default)]
pub struct RosterOptimizer {
    context: SearchContext,
    predictor: SecondaryPredictor,
    ga_config: GaConfig,
    sa_config: SaConfig,
    subscribers: Broadcast,
    cancel: Arc<AtomicBool>,
}

impl RosterOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ga_config(mut self, config: GaConfig) -> Self {
        self.ga_config = config;
        self
    }

    pub fn with_sa_config(mut self, config: SaConfig) -> Self {
        self.sa_config = config;
        self
    }

    pub fn with_predictor(mut self, predictor: SecondaryPredictor) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn ga_config(&self) -> &GaConfig {
        &self.ga_config
    }

    pub fn sa_config(&self) -> &SaConfig {
        &self.sa_config
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Upcoming fixture difficulties (1–5) per organization, nearest first.
    ///
    /// Replaces any earlier fixture data. Only the first five entries count and
    /// the sum is always divided by five. Organizations missing from the map
    /// contribute nothing to the fixture bonus.
    pub fn set_fixture_data(&mut self, fixtures: HashMap<OrganizationId, Vec<u8>>) {
        tracing::debug!(organizations = fixtures.len(), "fixture data updated");
        self.context.set_fixtures(fixtures);
    }

    /// Availability overrides per member. Replaces any earlier overrides.
    pub fn set_availability_data(&mut self, availability: HashMap<MemberId, Availability>) {
        tracing::debug!(members = availability.len(), "availability data updated");
        self.context.set_availability(availability);
    }

    /// Adds a subscriber notified once per generation or iteration of every run.
    pub fn subscribe_progress<R>(&mut self, reporter: R)
    where
        R: ProgressReporter + 'static,
    {
        self.subscribers.subscribe(Arc::new(reporter));
    }

    /// Subscribes a channel and returns its receiving end.
    ///
    /// The stream ends once the optimizer is dropped.
    pub fn progress_stream(&mut self) -> Receiver<ProgressEvent> {
        let (reporter, stream) = ChannelReporter::channel();
        self.subscribe_progress(reporter);
        stream
    }

    /// Shared cancellation flag, checked at every generation or iteration boundary.
    ///
    /// The flag stays set: later runs stop immediately until it is stored
    /// back to `false`.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn run_genetic_search(
        &self,
        pool: &[Member],
        constraints: Constraints,
    ) -> Result<SearchOutcome, RosterError> {
        self.ga_config.validate()?;
        let pool = preflight(pool, &constraints)?;

        tracing::info!(
            pool = pool.len(),
            budget = constraints.budget,
            strategy = %constraints.strategy,
            population = self.ga_config.population_size,
            generations = self.ga_config.generations,
            "starting genetic search"
        );
        let started = Instant::now();

        let problem = RosterProblem::new(&pool, constraints, self.evaluator())
            .with_mutation_tolerance(self.ga_config.mutation_cost_tolerance);
        let result = GaRunner::run_with_cancel(
            &problem,
            &self.ga_config,
            &self.subscribers,
            Some(self.cancel_handle()),
        )?;

        finish(
            "genetic search",
            result.best.roster,
            result.best_fitness,
            result.generations,
            result.cancelled,
            started,
        )
    }

    pub fn run_simulated_annealing(
        &self,
        pool: &[Member],
        constraints: Constraints,
    ) -> Result<SearchOutcome, RosterError> {
        self.sa_config.validate()?;
        let pool = preflight(pool, &constraints)?;

        tracing::info!(
            pool = pool.len(),
            budget = constraints.budget,
            strategy = %constraints.strategy,
            initial_temperature = self.sa_config.initial_temperature,
            cooling_rate = self.sa_config.cooling_rate,
            "starting simulated annealing"
        );
        let started = Instant::now();

        let problem = RosterProblem::new(&pool, constraints, self.evaluator())
            .with_neighbor_moves(
                self.sa_config.neighbor_cost_tolerance,
                self.sa_config.swap_probability,
            )
            .with_initial_attempts(self.sa_config.initial_attempts);
        let result = SaRunner::run_with_cancel(
            &problem,
            &self.sa_config,
            &self.subscribers,
            Some(self.cancel_handle()),
        )?;

        finish(
            "simulated annealing",
            result.best,
            result.best_fitness,
            result.iterations,
            result.cancelled,
            started,
        )
    }

    fn evaluator(&self) -> FitnessEvaluator<'_> {
        let valuation = ValuationModel::with_predictor(self.predictor, &self.context);
        FitnessEvaluator::with_valuation(valuation, &self.context)
    }
}

fn finish(
    algorithm: &str,
    roster: Roster,
    fitness: Fitness,
    steps: usize,
    cancelled: bool,
    started: Instant,
) -> Result<SearchOutcome, RosterError> {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match fitness {
        Fitness::Feasible(score) => {
            if cancelled {
                tracing::warn!(algorithm, steps, score, "search cancelled, returning best so far");
            } else {
                tracing::info!(algorithm, steps, score, elapsed_ms, "search finished");
            }
            Ok(SearchOutcome {
                roster,
                score,
                steps,
                cancelled,
            })
        }
        Fitness::Infeasible(reason) if cancelled => {
            tracing::warn!(algorithm, steps, %reason, "search cancelled without a feasible roster");
            Err(RosterError::Cancelled)
        }
        Fitness::Infeasible(reason) => {
            tracing::warn!(algorithm, steps, %reason, elapsed_ms, "no feasible roster found");
            Err(RosterError::NoFeasibleRoster { steps })
        }
    }
}

/// Rejects pools and constraints that can never yield a feasible roster,
/// then groups the pool by role.
pub fn preflight(pool: &[Member], constraints: &Constraints) -> Result<RolePool, RosterError> {
    if pool.is_empty() {
        return Err(RosterError::EmptyPool);
    }
    if constraints.budget < 0 {
        return Err(RosterError::NegativeBudget(constraints.budget));
    }

    let mut seen = HashSet::with_capacity(pool.len());
    for member in pool {
        if !seen.insert(member.id) {
            return Err(RosterError::DuplicateMember(member.id));
        }
        if member.cost < 0 {
            return Err(RosterError::InvalidMember {
                id: member.id,
                reason: format!("negative cost {}", member.cost),
            });
        }
        if !member.form.is_finite() || !member.ownership.is_finite() {
            return Err(RosterError::InvalidMember {
                id: member.id,
                reason: "form and ownership must be finite".into(),
            });
        }
    }

    let pool = RolePool::new(pool);
    for role in Role::ALL {
        let available = pool.candidates(role).len();
        if available < role.required() {
            return Err(RosterError::InsufficientRole {
                role,
                available,
                required: role.required(),
            });
        }
    }

    let capacity: usize = pool
        .organization_sizes()
        .values()
        .map(|&size| size.min(MAX_PER_ORGANIZATION))
        .sum();
    if capacity < SQUAD_SIZE {
        return Err(RosterError::InsufficientOrganizations {
            capacity,
            required: SQUAD_SIZE,
        });
    }

    Ok(pool)
}

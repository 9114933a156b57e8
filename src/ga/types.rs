//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop in [`GaRunner`](super::GaRunner) and a concrete problem
//! such as [`RosterProblem`](crate::problem::RosterProblem).

use crate::fitness::Fitness;
use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own [`Fitness`]. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness). Higher feasible fitness is
/// better; infeasible individuals rank below every feasible one.
pub trait Individual: Clone + Send + Sync {
    fn fitness(&self) -> Fitness;

    fn set_fitness(&mut self, fitness: Fitness);
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: how to create random individuals
/// 2. **Evaluation**: how to compute fitness
/// 3. **Crossover**: how to recombine two parents into one child
/// 4. **Mutation**: how to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel with rayon (feature `parallel`). Evaluation must
/// therefore be a pure function of the individual.
pub trait GaProblem: Send + Sync {
    type Individual: Individual;

    /// Creates a random individual for the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    fn evaluate(&self, individual: &Self::Individual) -> Fitness;

    /// Produces one child from two parents.
    ///
    /// The default implementation clones `parent1` (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place. Called with probability
    /// [`GaConfig::mutation_rate`](super::GaConfig::mutation_rate).
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}

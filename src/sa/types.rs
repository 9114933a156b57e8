//! Core trait for the annealing search.

use crate::fitness::Fitness;
use rand::Rng;

/// Defines an annealing problem.
///
/// The problem supplies a starting point, an evaluation and a neighbor
/// move; [`SaRunner`](super::SaRunner) handles temperature, acceptance
/// and cooling.
///
/// # Maximization
///
/// Higher feasible fitness is better. A neighbor move may fail (return
/// `None`), in which case the iteration is spent without moving.
pub trait SaProblem: Send + Sync {
    type Solution: Clone + Send;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    fn evaluate(&self, solution: &Self::Solution) -> Fitness;

    /// Proposes a solution close to `solution`, or `None` if the proposed
    /// move was rejected.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Option<Self::Solution>;
}

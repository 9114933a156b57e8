//! Roster selection expressed as a GA and an SA problem.
//!
//! [`RosterProblem`] binds the candidate pool, the run's constraints and a
//! [`FitnessEvaluator`] to the generic engines in [`ga`](crate::ga) and
//! [`sa`](crate::sa).

use crate::fitness::{Fitness, FitnessEvaluator};
use crate::ga::{GaProblem, Individual};
use crate::init::PopulationInitializer;
use crate::model::{Constraints, Cost, RolePool, Roster};
use crate::operators;
use crate::sa::SaProblem;
use rand::Rng;

/// A roster together with its cached fitness.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub roster: Roster,
    pub fitness: Fitness,
}

impl Candidate {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            fitness: Fitness::unevaluated(),
        }
    }
}

impl Individual for Candidate {
    fn fitness(&self) -> Fitness {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
    }
}

/// One roster search over a fixed pool and constraint set.
#[derive(Debug, Clone, Copy)]
pub struct RosterProblem<'a> {
    pool: &'a RolePool,
    constraints: Constraints,
    evaluator: FitnessEvaluator<'a>,
    mutation_tolerance: Cost,
    neighbor_tolerance: Cost,
    swap_probability: f64,
    initial_attempts: usize,
}

impl<'a> RosterProblem<'a> {
    pub fn new(
        pool: &'a RolePool,
        constraints: Constraints,
        evaluator: FitnessEvaluator<'a>,
    ) -> Self {
        Self {
            pool,
            constraints,
            evaluator,
            mutation_tolerance: 10,
            neighbor_tolerance: 15,
            swap_probability: 0.5,
            initial_attempts: 32,
        }
    }

    pub fn with_mutation_tolerance(mut self, tolerance: Cost) -> Self {
        self.mutation_tolerance = tolerance;
        self
    }

    pub fn with_neighbor_moves(mut self, tolerance: Cost, swap_probability: f64) -> Self {
        self.neighbor_tolerance = tolerance;
        self.swap_probability = swap_probability;
        self
    }

    pub fn with_initial_attempts(mut self, attempts: usize) -> Self {
        self.initial_attempts = attempts;
        self
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    fn initializer(&self) -> PopulationInitializer<'a> {
        PopulationInitializer::new(self.pool, self.constraints)
    }
}

impl GaProblem for RosterProblem<'_> {
    type Individual = Candidate;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Candidate {
        Candidate::new(self.initializer().random_roster(rng))
    }

    fn evaluate(&self, individual: &Candidate) -> Fitness {
        self.evaluator.evaluate(&individual.roster, &self.constraints)
    }

    fn crossover<R: Rng>(&self, parent1: &Candidate, parent2: &Candidate, rng: &mut R) -> Candidate {
        Candidate::new(operators::crossover(
            &parent1.roster,
            &parent2.roster,
            &self.constraints,
            rng,
        ))
    }

    fn mutate<R: Rng>(&self, individual: &mut Candidate, rng: &mut R) {
        operators::mutate(
            &mut individual.roster,
            self.pool,
            self.mutation_tolerance,
            &self.constraints,
            rng,
        );
    }
}

impl SaProblem for RosterProblem<'_> {
    type Solution = Roster;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Roster {
        self.initializer().feasible_roster(rng, self.initial_attempts)
    }

    fn evaluate(&self, roster: &Roster) -> Fitness {
        self.evaluator.evaluate(roster, &self.constraints)
    }

    fn neighbor<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Option<Roster> {
        operators::neighbor(
            roster,
            self.pool,
            self.neighbor_tolerance,
            self.swap_probability,
            &self.constraints,
            rng,
        )
    }
}

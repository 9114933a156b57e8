//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! elitism merge → repeat, tracking the best individual ever seen.

use super::config::GaConfig;
use super::types::{GaProblem, Individual};
use crate::error::RosterError;
use crate::fitness::Fitness;
use crate::progress::{ProgressEvent, ProgressReporter, Silent};
use crate::random::rng_from_option;
use rand::seq::IndexedRandom;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    ///
    /// Infeasible only if no feasible individual was ever produced.
    pub best: I,

    /// Same as `best.fitness()`.
    pub best_fitness: Fitness,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on its wall-clock limit.
    pub timed_out: bool,

    /// Best-ever fitness after initialization and after each generation.
    pub fitness_history: Vec<Fitness>,
}

/// Executes the GA evolutionary loop.
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA without progress reporting or cancellation.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, RosterError> {
        Self::run_with_cancel(problem, config, &Silent, None)
    }

    /// Runs the GA, reporting once per generation.
    ///
    /// If `cancel` is set to `true`, the GA stops before the next
    /// generation and returns the best individual found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        reporter: &dyn ProgressReporter,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, RosterError> {
        config.validate()?;

        let mut rng = rng_from_option(config.seed);
        let started = Instant::now();

        // 1. Initialize and evaluate
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate(problem, &mut population, config.parallel);
        sort_best_first(&mut population);

        let mut best = population[0].clone();
        let mut fitness_history = Vec::with_capacity(config.generations + 1);
        fitness_history.push(best.fitness());

        let mut generations = 0;
        let mut cancelled = false;
        let mut timed_out = false;

        // 2. Evolutionary loop; `population` is sorted best-first on entry.
        for gen in 0..config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            // Selection: parent pool of half the population
            let parents: Vec<usize> = (0..config.population_size / 2)
                .map(|_| config.selection.select(&population, &mut rng))
                .collect();

            // Elitism
            let mut next_gen: Vec<P::Individual> = population[..config.elite_size].to_vec();

            // Recombine and mutate
            while next_gen.len() < config.population_size {
                let p1 = pick(&parents, &mut rng);
                let p2 = pick(&parents, &mut rng);
                let mut child = problem.crossover(&population[p1], &population[p2], &mut rng);
                if rng.random_bool(config.mutation_rate) {
                    problem.mutate(&mut child, &mut rng);
                }
                next_gen.push(child);
            }

            // Evaluate offspring; elites keep their fitness
            evaluate(problem, &mut next_gen[config.elite_size..], config.parallel);
            sort_best_first(&mut next_gen);
            population = next_gen;
            generations = gen + 1;

            if population[0].fitness().is_better_than(&best.fitness()) {
                best = population[0].clone();
            }
            fitness_history.push(best.fitness());

            let average_fitness = average_feasible(&population);
            tracing::debug!(
                generation = generations,
                best = %best.fitness(),
                average = ?average_fitness,
                "generation complete"
            );
            reporter.report(&ProgressEvent::Generation {
                generation: generations,
                best_fitness: best.fitness(),
                average_fitness,
            });
        }

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            cancelled,
            timed_out,
            fitness_history,
        })
    }
}

fn pick<R: Rng>(parents: &[usize], rng: &mut R) -> usize {
    // `population_size >= 2` guarantees a non-empty parent pool.
    parents.choose(rng).copied().unwrap_or(0)
}

/// Evaluate individuals, in parallel when enabled.
#[cfg(feature = "parallel")]
fn evaluate<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, individuals);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], _parallel: bool) {
    evaluate_sequential(problem, individuals);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    for ind in individuals.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Sort by fitness, best first. Stable, so equal individuals keep their order.
fn sort_best_first<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| b.fitness().compare(&a.fitness()));
}

/// Mean score over the feasible individuals.
fn average_feasible<I: Individual>(population: &[I]) -> Option<f64> {
    let scores: Vec<f64> = population
        .iter()
        .filter_map(|ind| ind.fitness().score())
        .collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

// ============================================================================
// Tests
// ============================================================================

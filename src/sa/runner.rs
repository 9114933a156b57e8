//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::RosterError;
use crate::fitness::Fitness;
use crate::progress::{ProgressEvent, ProgressReporter, Silent};
use crate::random::rng_from_option;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found. Infeasible only if no feasible solution was
    /// ever visited.
    pub best: S,

    pub best_fitness: Fitness,

    /// Total number of iterations (one neighbor proposal each).
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves, improving ones included.
    pub accepted_moves: usize,

    /// Number of accepted moves that beat the current solution.
    pub improving_moves: usize,

    /// Iterations whose proposed neighbor was rejected before evaluation.
    pub discarded_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best-ever fitness at the start and after each iteration.
    pub fitness_history: Vec<Fitness>,
}

/// Executes the annealing loop.
pub struct SaRunner;

impl SaRunner {
    /// Runs the annealing search without progress reporting or cancellation.
    pub fn run<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>, RosterError> {
        Self::run_with_cancel(problem, config, &Silent, None)
    }

    /// Runs the annealing search, reporting once per iteration.
    ///
    /// The cancel flag is checked before every iteration.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        reporter: &dyn ProgressReporter,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>, RosterError> {
        config.validate()?;

        let mut rng = rng_from_option(config.seed);

        let mut current = problem.initial_solution(&mut rng);
        let mut current_fitness = problem.evaluate(&current);
        let mut best = current.clone();
        let mut best_fitness = current_fitness;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut discarded_moves = 0usize;
        let mut cancelled = false;

        let planned = config.planned_iterations();
        let planned = config.max_iterations.map_or(planned, |cap| cap.min(planned));
        let mut fitness_history = Vec::with_capacity(planned + 1);
        fitness_history.push(best_fitness);

        while temperature > config.min_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if config.max_iterations.is_some_and(|cap| iterations >= cap) {
                break;
            }

            match problem.neighbor(&current, &mut rng) {
                Some(neighbor) => {
                    let neighbor_fitness = problem.evaluate(&neighbor);
                    if let Some(improving) =
                        accept(neighbor_fitness, current_fitness, temperature, &mut rng)
                    {
                        current = neighbor;
                        current_fitness = neighbor_fitness;
                        accepted_moves += 1;
                        if improving {
                            improving_moves += 1;
                        }
                        if current_fitness.is_better_than(&best_fitness) {
                            best = current.clone();
                            best_fitness = current_fitness;
                        }
                    }
                }
                // The iteration still counts and the temperature still cools.
                None => discarded_moves += 1,
            }

            iterations += 1;
            temperature *= config.cooling_rate;
            fitness_history.push(best_fitness);

            tracing::trace!(
                iteration = iterations,
                temperature,
                current = %current_fitness,
                best = %best_fitness,
                "iteration complete"
            );
            reporter.report(&ProgressEvent::Iteration {
                iteration: iterations,
                temperature,
                current_fitness,
                best_fitness,
            });
        }

        tracing::debug!(
            iterations,
            accepted_moves,
            improving_moves,
            discarded_moves,
            final_temperature = temperature,
            "annealing finished"
        );

        Ok(SaResult {
            best,
            best_fitness,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            discarded_moves,
            cancelled,
            fitness_history,
        })
    }
}

/// Metropolis acceptance for maximization.
///
/// Returns `None` to reject, `Some(true)` for an improving move and
/// `Some(false)` for an accepted non-improving one.
fn accept<R: Rng>(
    candidate: Fitness,
    current: Fitness,
    temperature: f64,
    rng: &mut R,
) -> Option<bool> {
    match (candidate.score(), current.score()) {
        (Some(c), Some(cur)) if c > cur => Some(true),
        (Some(c), Some(cur)) => {
            let probability = ((c - cur) / temperature).exp();
            (rng.random::<f64>() < probability).then_some(false)
        }
        (Some(_), None) => Some(true),
        (None, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::sa::SaConfig;
    use crate::validation::Infeasibility;
    use std::sync::Mutex;

    // ---- Quadratic maximization: f(x) = -x^2, maximum at 0 ----

    struct QuadraticProblem;

    impl SaProblem for QuadraticProblem {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
            rng.random_range(-10.0..10.0)
        }

        fn evaluate(&self, x: &f64) -> Fitness {
            Fitness::Feasible(-(x * x))
        }

        fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> Option<f64> {
            Some(x + rng.random_range(-1.0..1.0))
        }
    }

    /// Every neighbor is one step up.
    struct Staircase;

    impl SaProblem for Staircase {
        type Solution = u32;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> u32 {
            0
        }

        fn evaluate(&self, x: &u32) -> Fitness {
            Fitness::Feasible(f64::from(*x))
        }

        fn neighbor<R: Rng>(&self, x: &u32, _rng: &mut R) -> Option<u32> {
            Some(x + 1)
        }
    }

    /// Every proposed move is rejected.
    struct Frozen;

    impl SaProblem for Frozen {
        type Solution = u32;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> u32 {
            7
        }

        fn evaluate(&self, x: &u32) -> Fitness {
            Fitness::Feasible(f64::from(*x))
        }

        fn neighbor<R: Rng>(&self, _x: &u32, _rng: &mut R) -> Option<u32> {
            None
        }
    }

    /// Starts infeasible; positive values are feasible.
    struct InfeasibleStart;

    impl SaProblem for InfeasibleStart {
        type Solution = i32;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i32 {
            -3
        }

        fn evaluate(&self, x: &i32) -> Fitness {
            if *x > 0 {
                Fitness::Feasible(f64::from(*x))
            } else {
                Fitness::Infeasible(Infeasibility::WrongSize { count: 0 })
            }
        }

        fn neighbor<R: Rng>(&self, x: &i32, _rng: &mut R) -> Option<i32> {
            Some(x + 1)
        }
    }

    #[test]
    fn test_default_schedule_runs_135_iterations() {
        let result = SaRunner::run(&QuadraticProblem, &SaConfig::default().with_seed(42)).unwrap();
        assert_eq!(result.iterations, 135);
        assert!(result.final_temperature <= 1.0);
        assert!(result.final_temperature > 0.95);
        assert_eq!(result.fitness_history.len(), 136);
    }

    #[test]
    fn test_temperature_strictly_decreasing() {
        let temperatures = Mutex::new(Vec::new());
        let reporter = |e: &ProgressEvent| {
            if let ProgressEvent::Iteration { temperature, .. } = e {
                temperatures.lock().unwrap().push(*temperature);
            }
        };
        let config = SaConfig::default().with_seed(1);
        SaRunner::run_with_cancel(&QuadraticProblem, &config, &reporter, None).unwrap();

        let temperatures = temperatures.into_inner().unwrap();
        assert_eq!(temperatures.len(), 135);
        assert!((temperatures[0] - 950.0).abs() < 1e-9);
        for pair in temperatures.windows(2) {
            assert!(pair[1] < pair[0]);
            assert!((pair[1] / pair[0] - 0.95).abs() < 1e-12);
        }
    }

    #[test]
    fn test_best_history_non_decreasing() {
        let result = SaRunner::run(&QuadraticProblem, &SaConfig::default().with_seed(9)).unwrap();
        for pair in result.fitness_history.windows(2) {
            assert_ne!(pair[1].compare(&pair[0]), std::cmp::Ordering::Less);
        }
        assert_eq!(result.fitness_history.last(), Some(&result.best_fitness));
    }

    #[test]
    fn test_improving_moves_always_accepted() {
        let result = SaRunner::run(&Staircase, &SaConfig::default().with_seed(5)).unwrap();
        assert_eq!(result.accepted_moves, result.iterations);
        assert_eq!(result.improving_moves, result.iterations);
        assert_eq!(result.best, 135);
        assert_eq!(result.best_fitness, Fitness::Feasible(135.0));
    }

    #[test]
    fn test_discarded_moves_still_cool() {
        let result = SaRunner::run(&Frozen, &SaConfig::default().with_seed(5)).unwrap();
        assert_eq!(result.iterations, 135);
        assert_eq!(result.discarded_moves, 135);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.best, 7);
    }

    #[test]
    fn test_infeasible_start_moves_to_feasible() {
        let result = SaRunner::run(&InfeasibleStart, &SaConfig::default().with_seed(5)).unwrap();
        // Infeasible neighbors are rejected against an infeasible current.
        assert_eq!(result.best, -3);
        assert!(!result.best_fitness.is_feasible());

        struct Jump;
        impl SaProblem for Jump {
            type Solution = i32;
            fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i32 {
                -3
            }
            fn evaluate(&self, x: &i32) -> Fitness {
                InfeasibleStart.evaluate(x)
            }
            fn neighbor<R: Rng>(&self, x: &i32, _rng: &mut R) -> Option<i32> {
                Some(x.abs() + 1)
            }
        }
        let result = SaRunner::run(&Jump, &SaConfig::default().with_seed(5)).unwrap();
        assert!(result.best_fitness.is_feasible());
    }

    #[test]
    fn test_max_iterations_cap() {
        let config = SaConfig::default().with_max_iterations(20).with_seed(42);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();
        assert_eq!(result.iterations, 20);
        assert!(result.final_temperature > 1.0);
    }

    #[test]
    fn test_cancellation() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result = SaRunner::run_with_cancel(
            &QuadraticProblem,
            &SaConfig::default().with_seed(42),
            &Silent,
            Some(cancel),
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!((result.final_temperature - 1000.0).abs() < 1e-10);
    }

    #[test]
    fn test_high_temperature_accepts_uphill() {
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling_rate(0.999)
            .with_seed(42);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();
        let ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(ratio > 0.95, "expected near-total acceptance, got {ratio}");
    }

    #[test]
    fn test_accept_rules() {
        let mut rng = create_rng(0);
        let infeasible = Fitness::Infeasible(Infeasibility::NotEvaluated);
        assert_eq!(
            accept(Fitness::Feasible(2.0), Fitness::Feasible(1.0), 1.0, &mut rng),
            Some(true)
        );
        assert_eq!(
            accept(Fitness::Feasible(1.0), infeasible, 1.0, &mut rng),
            Some(true)
        );
        assert_eq!(
            accept(infeasible, Fitness::Feasible(1.0), 1e9, &mut rng),
            None
        );
        // exp(-1000) underflows to zero
        assert_eq!(
            accept(Fitness::Feasible(0.0), Fitness::Feasible(1000.0), 1.0, &mut rng),
            None
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        let config = SaConfig::default().with_cooling_rate(1.5);
        assert!(matches!(
            SaRunner::run(&QuadraticProblem, &config),
            Err(RosterError::InvalidConfig(_))
        ));

        let mut config = SaConfig::default().with_seed(1);
        config.swap_probability = 1.5;
        assert!(matches!(
            SaRunner::run(&QuadraticProblem, &config),
            Err(RosterError::InvalidConfig(_))
        ));
    }
}

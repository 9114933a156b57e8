//! Genetic search engine.
//!
//! A generic GA built on trait-based abstractions. A problem implements
//! [`GaProblem`], which specifies how to create, evaluate, recombine and
//! mutate individuals; [`GaRunner`] drives the loop:
//!
//! 1. Evaluate and rank the population (best first)
//! 2. Fill a parent pool of half the population by [`Selection`]
//! 3. Copy the top `elite_size` individuals unchanged
//! 4. Fill the rest with mutated crossover children of random pool parents
//!
//! The best individual ever seen is the result, so best-known fitness never
//! decreases from one generation to the next.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use types::{GaProblem, Individual};

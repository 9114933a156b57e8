//! Simulated annealing.
//!
//! A single-solution trajectory search. Worsening moves are accepted with
//! probability `exp(Δ / T)`, which shrinks as the temperature `T` cools
//! geometrically, so the search can leave local optima early and settles
//! down later.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
pub use types::SaProblem;

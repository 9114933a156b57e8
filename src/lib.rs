//! Fixed-size roster selection under a budget.
//!
//! Picks 15 members (2 goalkeepers, 5 defenders, 5 midfielders, 3 forwards)
//! from a candidate pool so that total cost stays within a budget and no
//! organization supplies more than 3 members, maximizing a composite
//! desirability score. Two searches are provided:
//!
//! - **Genetic search**: population-based, with tournament or rank
//!   selection, role-wise crossover, bounded replacement mutation and elitism.
//! - **Simulated annealing**: single-roster trajectory with swap/replace
//!   neighbor moves, Metropolis acceptance and geometric cooling.
//!
//! Both engines are generic ([`ga::GaProblem`], [`sa::SaProblem`]); the
//! roster problem plugs into them through [`problem::RosterProblem`].
//!
//! # Architecture
//!
//! - [`model`]: members, roles, constraints, rosters and the role-indexed pool
//! - [`validation`], [`valuation`], [`fitness`]: pure scoring and feasibility
//! - [`init`], [`operators`]: roster construction and moves
//! - [`ga`], [`sa`]: search engines
//! - [`optimizer`]: the [`RosterOptimizer`] facade with preflight checks,
//!   progress subscribers and cancellation
//!
//! The library emits `tracing` events and installs no subscriber.

pub mod context;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod init;
pub mod model;
pub mod operators;
pub mod optimizer;
pub mod problem;
pub mod progress;
pub mod random;
pub mod sa;
pub mod validation;
pub mod valuation;

pub use context::SearchContext;
pub use error::RosterError;
pub use fitness::{Fitness, FitnessEvaluator};
pub use model::{Constraints, Member, Role, Roster, Strategy};
pub use optimizer::{RosterOptimizer, SearchOutcome};
pub use progress::{ProgressEvent, ProgressReporter};

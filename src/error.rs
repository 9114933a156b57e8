//! Error type for run setup and terminal search outcomes.
//!
//! Infeasible rosters found *during* a search are not errors; they travel as
//! [`Fitness::Infeasible`](crate::fitness::Fitness::Infeasible). This enum
//! covers problems detected before a run starts and the two ways a run can
//! end without a roster to return.

use crate::model::{Cost, MemberId, Role};
use thiserror::Error;

/// Errors reported by [`RosterOptimizer`](crate::optimizer::RosterOptimizer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("candidate pool is empty")]
    EmptyPool,

    #[error("budget must be non-negative, got {0}")]
    NegativeBudget(Cost),

    #[error("member {id} is invalid: {reason}")]
    InvalidMember { id: MemberId, reason: String },

    #[error("member id {0} appears more than once in the pool")]
    DuplicateMember(MemberId),

    #[error("pool has {available} {role} candidates, {required} required")]
    InsufficientRole {
        role: Role,
        available: usize,
        required: usize,
    },

    #[error("pool organizations can supply at most {capacity} members, {required} required")]
    InsufficientOrganizations { capacity: usize, required: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no feasible roster found after {steps} steps")]
    NoFeasibleRoster { steps: usize },

    #[error("search cancelled before a feasible roster was found")]
    Cancelled,
}

impl RosterError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        RosterError::InvalidConfig(msg.into())
    }
}

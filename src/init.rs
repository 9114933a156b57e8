//! Random roster construction.

use crate::model::{
    Constraints, Member, OrganizationId, Role, RolePool, Roster, MAX_PER_ORGANIZATION,
};
use crate::validation::ConstraintValidator;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds random rosters from a [`RolePool`].
///
/// Each role is filled greedily from a shuffled candidate list while the
/// remaining budget and the organization cap allow it. If a role is still
/// short, the cheapest unused candidates of that role fill the gap without
/// re-checking the organization cap or budget, so the result can be
/// infeasible on tight pools. Callers score such rosters infeasible.
#[derive(Debug, Clone, Copy)]
pub struct PopulationInitializer<'a> {
    pool: &'a RolePool,
    constraints: Constraints,
}

impl<'a> PopulationInitializer<'a> {
    pub fn new(pool: &'a RolePool, constraints: Constraints) -> Self {
        Self { pool, constraints }
    }

    pub fn random_roster<R: Rng>(&self, rng: &mut R) -> Roster {
        let mut roster = Roster::new();
        let mut org_counts: HashMap<OrganizationId, usize> = HashMap::new();
        let mut remaining = self.constraints.budget;

        for role in Role::ALL {
            let required = role.required();
            let mut shuffled: Vec<&Arc<Member>> = self.pool.candidates(role).iter().collect();
            shuffled.shuffle(rng);

            let mut added = 0;
            let mut skipped: Vec<&Arc<Member>> = Vec::new();
            for member in shuffled {
                if added == required {
                    break;
                }
                let count = org_counts.get(&member.organization).copied().unwrap_or(0);
                if member.cost > remaining || count >= MAX_PER_ORGANIZATION {
                    skipped.push(member);
                    continue;
                }
                roster.push(Arc::clone(member));
                *org_counts.entry(member.organization).or_insert(0) += 1;
                remaining -= member.cost;
                added += 1;
            }

            if added < required {
                tracing::debug!(
                    %role,
                    added,
                    required,
                    "greedy fill short, topping up with cheapest candidates"
                );
                skipped.sort_by_key(|m| m.cost);
                for member in skipped.into_iter().take(required - added) {
                    roster.push(Arc::clone(member));
                    *org_counts.entry(member.organization).or_insert(0) += 1;
                    remaining -= member.cost;
                }
            }
        }

        roster
    }

    /// Retries [`random_roster`](Self::random_roster) until a feasible roster appears.
    ///
    /// Returns the last attempt when none of `attempts` is feasible.
    pub fn feasible_roster<R: Rng>(&self, rng: &mut R, attempts: usize) -> Roster {
        let validator = ConstraintValidator;
        let mut roster = self.random_roster(rng);
        for _ in 1..attempts {
            if validator.is_valid(&roster, &self.constraints) {
                break;
            }
            roster = self.random_roster(rng);
        }
        roster
    }
}

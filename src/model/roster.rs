//! The roster: members grouped by role.

use super::member::{Cost, Member, MemberId, OrganizationId, Role};
use std::collections::HashMap;
use std::sync::Arc;

/// Total number of roster slots across all roles.
pub const SQUAD_SIZE: usize = 15;

/// Maximum members any one organization may contribute.
pub const MAX_PER_ORGANIZATION: usize = 3;

/// A selection of members, stored per role in slot order.
///
/// Members are shared through `Arc`, so cloning a roster copies four small
/// vectors of pointers and never duplicates or aliases member data.
/// A roster may be transiently infeasible while a search is manipulating it;
/// see [`ConstraintValidator`](crate::validation::ConstraintValidator).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    slots: [Vec<Arc<Member>>; 4],
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster by placing each member under its own role.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Arc<Member>>,
    {
        let mut roster = Self::new();
        for member in members {
            roster.push(member);
        }
        roster
    }

    /// Appends a member to the slots of its role.
    pub fn push(&mut self, member: Arc<Member>) {
        self.slots[member.role.index()].push(member);
    }

    pub fn slots(&self, role: Role) -> &[Arc<Member>] {
        &self.slots[role.index()]
    }

    pub(crate) fn slots_mut(&mut self, role: Role) -> &mut Vec<Arc<Member>> {
        &mut self.slots[role.index()]
    }

    /// Iterates all members in role order.
    pub fn members(&self) -> impl Iterator<Item = &Arc<Member>> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    pub fn total_cost(&self) -> Cost {
        self.members().map(|m| m.cost).sum()
    }

    pub fn role_cost(&self, role: Role) -> Cost {
        self.slots(role).iter().map(|m| m.cost).sum()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members().any(|m| m.id == id)
    }

    /// Number of members contributed by each organization.
    pub fn organization_counts(&self) -> HashMap<OrganizationId, usize> {
        let mut counts = HashMap::new();
        for member in self.members() {
            *counts.entry(member.organization).or_insert(0) += 1;
        }
        counts
    }

    /// Member ids in ascending order, independent of slot order.
    pub fn sorted_ids(&self) -> Vec<MemberId> {
        let mut ids: Vec<MemberId> = self.members().map(|m| m.id).collect();
        ids.sort_unstable();
        ids
    }
}

//! Candidate pool grouped by role.

use super::member::{Member, OrganizationId, Role};
use std::collections::HashMap;
use std::sync::Arc;

/// The immutable candidate pool of one run, indexed by role.
#[derive(Debug, Clone, Default)]
pub struct RolePool {
    by_role: [Vec<Arc<Member>>; 4],
}

impl RolePool {
    pub fn new(members: &[Member]) -> Self {
        members.iter().cloned().map(Arc::new).collect()
    }

    /// Candidates of one role, in pool order.
    pub fn candidates(&self, role: Role) -> &[Arc<Member>] {
        &self.by_role[role.index()]
    }

    pub fn len(&self) -> usize {
        self.by_role.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_role.iter().all(Vec::is_empty)
    }

    pub fn members(&self) -> impl Iterator<Item = &Arc<Member>> {
        self.by_role.iter().flatten()
    }

    /// Number of candidates from each organization.
    pub fn organization_sizes(&self) -> HashMap<OrganizationId, usize> {
        let mut sizes = HashMap::new();
        for member in self.members() {
            *sizes.entry(member.organization).or_insert(0) += 1;
        }
        sizes
    }
}

impl FromIterator<Arc<Member>> for RolePool {
    fn from_iter<I: IntoIterator<Item = Arc<Member>>>(iter: I) -> Self {
        let mut pool = RolePool::default();
        for member in iter {
            pool.by_role[member.role.index()].push(member);
        }
        pool
    }
}

//! Feasibility checks and crossover repair.
//!
//! A roster is feasible when it has exactly [`SQUAD_SIZE`] distinct members,
//! the required count for every [`Role`], no organization above
//! [`MAX_PER_ORGANIZATION`], and a total cost within budget.

use crate::model::{
    Constraints, Cost, MemberId, OrganizationId, Role, Roster, MAX_PER_ORGANIZATION, SQUAD_SIZE,
};
use std::collections::HashSet;
use std::fmt;

/// Why a roster was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// The candidate has not been scored yet.
    NotEvaluated,
    WrongSize { count: usize },
    RoleQuota { role: Role, count: usize },
    DuplicateMember { id: MemberId },
    OrganizationCap {
        organization: OrganizationId,
        count: usize,
    },
    OverBudget { cost: Cost, budget: Cost },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::NotEvaluated => write!(f, "not evaluated"),
            Infeasibility::WrongSize { count } => {
                write!(f, "roster has {count} members, {SQUAD_SIZE} required")
            }
            Infeasibility::RoleQuota { role, count } => {
                write!(f, "{count} {role}s selected, {} required", role.required())
            }
            Infeasibility::DuplicateMember { id } => write!(f, "member {id} selected twice"),
            Infeasibility::OrganizationCap {
                organization,
                count,
            } => write!(
                f,
                "organization {organization} contributes {count} members, max {MAX_PER_ORGANIZATION}"
            ),
            Infeasibility::OverBudget { cost, budget } => {
                write!(f, "cost {cost} exceeds budget {budget}")
            }
        }
    }
}

/// Stateless feasibility checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    /// Checks size, role quotas, duplicates and the organization cap.
    pub fn check_composition(&self, roster: &Roster) -> Result<(), Infeasibility> {
        let count = roster.len();
        if count != SQUAD_SIZE {
            return Err(Infeasibility::WrongSize { count });
        }
        for role in Role::ALL {
            let count = roster.slots(role).len();
            if count != role.required() {
                return Err(Infeasibility::RoleQuota { role, count });
            }
        }
        let mut seen = HashSet::with_capacity(SQUAD_SIZE);
        for member in roster.members() {
            if !seen.insert(member.id) {
                return Err(Infeasibility::DuplicateMember { id: member.id });
            }
        }
        // Smallest offending organization id keeps the reported reason deterministic.
        let worst = roster
            .organization_counts()
            .into_iter()
            .filter(|&(_, count)| count > MAX_PER_ORGANIZATION)
            .min_by_key(|&(organization, _)| organization);
        if let Some((organization, count)) = worst {
            return Err(Infeasibility::OrganizationCap {
                organization,
                count,
            });
        }
        Ok(())
    }

    /// Full check: composition plus budget.
    pub fn check(&self, roster: &Roster, constraints: &Constraints) -> Result<(), Infeasibility> {
        self.check_composition(roster)?;
        let cost = roster.total_cost();
        if cost > constraints.budget {
            return Err(Infeasibility::OverBudget {
                cost,
                budget: constraints.budget,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self, roster: &Roster, constraints: &Constraints) -> bool {
        self.check(roster, constraints).is_ok()
    }

    /// Keeps `child` when it is feasible, otherwise falls back to `parent1`.
    ///
    /// `parent2` is accepted for symmetry with crossover but never returned.
    pub fn repair(
        &self,
        child: Roster,
        parent1: &Roster,
        _parent2: &Roster,
        constraints: &Constraints,
    ) -> Roster {
        match self.check(&child, constraints) {
            Ok(()) => child,
            Err(reason) => {
                tracing::trace!(%reason, "crossover child rejected, keeping first parent");
                parent1.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, Strategy};
    use std::sync::Arc;

    /// Feasible 15-member roster: each member from its own organization, cost 50.
    fn full_roster() -> Roster {
        let mut id = 0;
        let mut members = Vec::new();
        for role in Role::ALL {
            for _ in 0..role.required() {
                id += 1;
                members.push(Arc::new(Member::new(id, role, id, 50)));
            }
        }
        Roster::from_members(members)
    }

    fn constraints(budget: Cost) -> Constraints {
        Constraints::new(budget, Strategy::Balanced)
    }

    #[test]
    fn test_valid_roster() {
        let v = ConstraintValidator;
        assert!(v.is_valid(&full_roster(), &constraints(1000)));
        assert!(v.is_valid(&full_roster(), &constraints(750)));
    }

    #[test]
    fn test_over_budget() {
        let v = ConstraintValidator;
        assert_eq!(
            v.check(&full_roster(), &constraints(749)),
            Err(Infeasibility::OverBudget {
                cost: 750,
                budget: 749
            })
        );
    }

    #[test]
    fn test_wrong_size() {
        let mut roster = full_roster();
        roster.slots_mut(Role::Forward).pop();
        assert_eq!(
            ConstraintValidator.check_composition(&roster),
            Err(Infeasibility::WrongSize { count: 14 })
        );
    }

    #[test]
    fn test_role_quota() {
        let mut roster = full_roster();
        roster.slots_mut(Role::Forward).pop();
        roster.push(Arc::new(Member::new(99, Role::Defender, 99, 50)));
        assert_eq!(
            ConstraintValidator.check_composition(&roster),
            Err(Infeasibility::RoleQuota {
                role: Role::Defender,
                count: 6
            })
        );
    }

    #[test]
    fn test_duplicate_member() {
        let mut roster = full_roster();
        let dup = roster.slots(Role::Defender)[0].clone();
        roster.slots_mut(Role::Defender)[1] = dup;
        assert_eq!(
            ConstraintValidator.check_composition(&roster),
            Err(Infeasibility::DuplicateMember { id: 3 })
        );
    }

    #[test]
    fn test_organization_cap() {
        let mut roster = full_roster();
        for (i, slot) in roster.slots_mut(Role::Defender).iter_mut().enumerate() {
            *slot = Arc::new(Member::new(100 + i as u32, Role::Defender, 42, 50));
        }
        assert_eq!(
            ConstraintValidator.check_composition(&roster),
            Err(Infeasibility::OrganizationCap {
                organization: 42,
                count: 5
            })
        );
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let v = ConstraintValidator;
        let c = constraints(749);
        let roster = full_roster();
        let first = v.is_valid(&roster, &c);
        let second = v.is_valid(&roster, &c);
        assert_eq!(first, second);
    }

    #[test]
    fn test_repair_keeps_valid_child() {
        let v = ConstraintValidator;
        let child = full_roster();
        let mut parent = full_roster();
        parent.slots_mut(Role::Forward).pop();
        let repaired = v.repair(child.clone(), &parent, &parent, &constraints(1000));
        assert_eq!(repaired, child);
    }

    #[test]
    fn test_repair_falls_back_to_first_parent() {
        let v = ConstraintValidator;
        let mut child = full_roster();
        child.slots_mut(Role::Forward).pop();
        let parent1 = full_roster();
        let mut parent2 = full_roster();
        parent2.slots_mut(Role::Goalkeeper).pop();
        let repaired = v.repair(child, &parent1, &parent2, &constraints(1000));
        assert_eq!(repaired, parent1);
    }
}

//! Roster recombination and local moves.
//!
//! - [`crossover`]: role-wise recombination of two parents, repaired to parent 1
//! - [`mutate`]: single-slot replacement within a cost tolerance, reverted if infeasible
//! - [`neighbor`]: annealing move, either a same-role slot swap or a replacement
//!
//! Every operator leaves its input untouched when the result would be
//! infeasible, so a feasible roster never turns infeasible through them.

use crate::model::{
    Constraints, Cost, Member, MemberId, OrganizationId, Role, RolePool, Roster,
    MAX_PER_ORGANIZATION,
};
use crate::validation::ConstraintValidator;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Role-wise crossover.
///
/// For each role, the de-duplicated union of both parents' members is
/// shuffled and the first `required` taken, dropping any that would push
/// an organization over the cap. An infeasible child is replaced by
/// `parent1` via [`ConstraintValidator::repair`].
pub fn crossover<R: Rng>(
    parent1: &Roster,
    parent2: &Roster,
    constraints: &Constraints,
    rng: &mut R,
) -> Roster {
    let mut child = Roster::new();
    let mut used: HashSet<MemberId> = HashSet::new();
    let mut org_counts: HashMap<OrganizationId, usize> = HashMap::new();

    for role in Role::ALL {
        let mut union: Vec<&Arc<Member>> = Vec::new();
        for member in parent1.slots(role).iter().chain(parent2.slots(role)) {
            if !used.contains(&member.id) && !union.iter().any(|m| m.id == member.id) {
                union.push(member);
            }
        }
        union.shuffle(rng);

        for member in union.into_iter().take(role.required()) {
            let count = org_counts.entry(member.organization).or_insert(0);
            if *count >= MAX_PER_ORGANIZATION {
                continue;
            }
            *count += 1;
            used.insert(member.id);
            child.push(Arc::clone(member));
        }
    }

    ConstraintValidator.repair(child, parent1, parent2, constraints)
}

/// Picks a random role and slot, returning the slot's role and index.
fn random_slot<R: Rng>(roster: &Roster, rng: &mut R) -> Option<(Role, usize)> {
    let role = *Role::ALL.choose(rng)?;
    let len = roster.slots(role).len();
    if len == 0 {
        return None;
    }
    Some((role, rng.random_range(0..len)))
}

/// Replaces slot `index` of `role` with a random same-role candidate whose
/// cost is within `tolerance` of the current occupant.
fn replace_slot<R: Rng>(
    roster: &mut Roster,
    role: Role,
    index: usize,
    pool: &RolePool,
    tolerance: Cost,
    rng: &mut R,
) -> bool {
    let old_cost = roster.slots(role)[index].cost;
    let replacements: Vec<&Arc<Member>> = pool
        .candidates(role)
        .iter()
        .filter(|m| (m.cost - old_cost).abs() <= tolerance && !roster.contains(m.id))
        .collect();
    match replacements.choose(rng) {
        Some(&replacement) => {
            roster.slots_mut(role)[index] = Arc::clone(replacement);
            true
        }
        None => false,
    }
}

/// Bounded replacement mutation.
///
/// Replaces one random member with a same-role candidate from `pool`
/// that is not already selected and costs within `tolerance` of it.
/// Returns `true` if the roster changed; an infeasible result is discarded
/// and the roster is left as it was.
pub fn mutate<R: Rng>(
    roster: &mut Roster,
    pool: &RolePool,
    tolerance: Cost,
    constraints: &Constraints,
    rng: &mut R,
) -> bool {
    let Some((role, index)) = random_slot(roster, rng) else {
        return false;
    };
    let mut mutated = roster.clone();
    if !replace_slot(&mut mutated, role, index, pool, tolerance, rng) {
        return false;
    }
    if !ConstraintValidator.is_valid(&mutated, constraints) {
        return false;
    }
    *roster = mutated;
    true
}

/// Annealing neighbor.
///
/// With probability `swap_probability` two slots of one role trade places;
/// otherwise one slot is replaced as in [`mutate`] with `tolerance`.
/// Returns `None` when the proposed roster is infeasible.
pub fn neighbor<R: Rng>(
    roster: &Roster,
    pool: &RolePool,
    tolerance: Cost,
    swap_probability: f64,
    constraints: &Constraints,
    rng: &mut R,
) -> Option<Roster> {
    let mut next = roster.clone();
    if rng.random_bool(swap_probability) {
        let role = *Role::ALL.choose(rng)?;
        let slots = next.slots_mut(role);
        if slots.len() >= 2 {
            let i = rng.random_range(0..slots.len());
            let j = rng.random_range(0..slots.len());
            slots.swap(i, j);
        }
    } else if let Some((role, index)) = random_slot(&next, rng) {
        replace_slot(&mut next, role, index, pool, tolerance, rng);
    }

    ConstraintValidator
        .is_valid(&next, constraints)
        .then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::PopulationInitializer;
    use crate::model::Strategy;
    use crate::random::create_rng;

    /// 12 candidates per role across 12 organizations, costs 40..=62 step 2.
    fn pool() -> RolePool {
        let mut members = Vec::new();
        let mut id = 0;
        for role in Role::ALL {
            for k in 0..12u32 {
                id += 1;
                members.push(Member::new(id, role, k, 40 + Cost::from(2 * k)));
            }
        }
        RolePool::new(&members)
    }

    fn c() -> Constraints {
        Constraints::new(1000, Strategy::Balanced)
    }

    #[test]
    fn test_crossover_draws_from_parents_only() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(11);
        for _ in 0..100 {
            let p1 = init.random_roster(&mut rng);
            let p2 = init.random_roster(&mut rng);
            let child = crossover(&p1, &p2, &c(), &mut rng);
            for member in child.members() {
                assert!(p1.contains(member.id) || p2.contains(member.id));
            }
            assert!(ConstraintValidator.is_valid(&child, &c()));
        }
    }

    #[test]
    fn test_crossover_of_identical_parents() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(2);
        let parent = init.random_roster(&mut rng);
        let child = crossover(&parent, &parent, &c(), &mut rng);
        assert_eq!(child.sorted_ids(), parent.sorted_ids());
    }

    #[test]
    fn test_crossover_falls_back_to_first_parent() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(4);
        let p1 = init.random_roster(&mut rng);
        let mut p2 = init.random_roster(&mut rng);
        p2.slots_mut(Role::Goalkeeper).clear();
        // Budget below any roster: every child is infeasible.
        let tight = Constraints::new(10, Strategy::Balanced);
        let child = crossover(&p1, &p2, &tight, &mut rng);
        assert_eq!(child, p1);
    }

    #[test]
    fn test_mutation_respects_role_and_tolerance() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(8);
        let mut changed = 0;
        for _ in 0..200 {
            let before = init.random_roster(&mut rng);
            let mut after = before.clone();
            if !mutate(&mut after, &pool, 10, &c(), &mut rng) {
                assert_eq!(after, before);
                continue;
            }
            changed += 1;
            for role in Role::ALL {
                for (old, new) in before.slots(role).iter().zip(after.slots(role)) {
                    assert_eq!(new.role, role);
                    if old.id != new.id {
                        assert!((old.cost - new.cost).abs() <= 10);
                        assert!(!before.contains(new.id));
                    }
                }
            }
            assert!(ConstraintValidator.is_valid(&after, &c()));
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_mutation_reverts_infeasible_result() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(8);
        let roster = init.random_roster(&mut rng);
        // Budget fully spent: any pricier replacement has to be reverted.
        let exact = Constraints::new(roster.total_cost(), Strategy::Balanced);
        for _ in 0..100 {
            let mut copy = roster.clone();
            mutate(&mut copy, &pool, 10, &exact, &mut rng);
            assert!(copy.total_cost() <= exact.budget);
        }
    }

    #[test]
    fn test_neighbor_swap_keeps_membership() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(21);
        let roster = init.random_roster(&mut rng);
        for _ in 0..50 {
            let next = neighbor(&roster, &pool, 15, 1.0, &c(), &mut rng).unwrap();
            assert_eq!(next.sorted_ids(), roster.sorted_ids());
        }
    }

    #[test]
    fn test_neighbor_replacement_within_tolerance() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(22);
        let roster = init.random_roster(&mut rng);
        for _ in 0..100 {
            if let Some(next) = neighbor(&roster, &pool, 15, 0.0, &c(), &mut rng) {
                assert!(ConstraintValidator.is_valid(&next, &c()));
                for role in Role::ALL {
                    for (old, new) in roster.slots(role).iter().zip(next.slots(role)) {
                        assert!((old.cost - new.cost).abs() <= 15);
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbor_of_infeasible_is_none() {
        let pool = pool();
        let init = PopulationInitializer::new(&pool, c());
        let mut rng = create_rng(23);
        let mut roster = init.random_roster(&mut rng);
        roster.slots_mut(Role::Forward).pop();
        assert!(neighbor(&roster, &pool, 15, 1.0, &c(), &mut rng).is_none());
    }
}

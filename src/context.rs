//! Auxiliary inputs supplied alongside the candidate pool.

use crate::model::{Availability, Member, MemberId, OrganizationId};
use std::collections::HashMap;

/// Number of upcoming fixtures considered for the fixture bonus.
pub const FIXTURE_WINDOW: usize = 5;

/// Fixture difficulties and availability overrides for one run.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    fixtures: Option<HashMap<OrganizationId, Vec<u8>>>,
    availability: HashMap<MemberId, Availability>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the fixture-difficulty map (organization → upcoming difficulties, 1–5).
    pub fn set_fixtures(&mut self, fixtures: HashMap<OrganizationId, Vec<u8>>) {
        self.fixtures = Some(fixtures);
    }

    pub fn clear_fixtures(&mut self) {
        self.fixtures = None;
    }

    /// Replaces the availability map.
    pub fn set_availability(&mut self, availability: HashMap<MemberId, Availability>) {
        self.availability = availability;
    }

    pub fn has_fixtures(&self) -> bool {
        self.fixtures.is_some()
    }

    /// Sum of the first [`FIXTURE_WINDOW`] difficulties of an organization,
    /// divided by [`FIXTURE_WINDOW`].
    ///
    /// Missing fixtures count as zero, so a listed organization with a short
    /// or empty run yields a smaller mean. `None` when no fixture data is
    /// loaded or the organization is not listed.
    pub fn mean_difficulty(&self, organization: OrganizationId) -> Option<f64> {
        let upcoming = self.fixtures.as_ref()?.get(&organization)?;
        let sum: f64 = upcoming
            .iter()
            .take(FIXTURE_WINDOW)
            .map(|&d| f64::from(d))
            .sum();
        Some(sum / FIXTURE_WINDOW as f64)
    }

    /// Effective availability: map entry, else the member's own status, else
    /// derived from the reported chance of playing.
    pub fn availability_of(&self, member: &Member) -> Availability {
        self.availability
            .get(&member.id)
            .copied()
            .or(member.status)
            .or_else(|| member.chance_of_playing.map(Availability::from_chance))
            .unwrap_or_default()
    }
}

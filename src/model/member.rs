//! Candidate members and their roles.

use std::fmt;

/// Identifier of a member in the candidate pool.
pub type MemberId = u32;

/// Identifier of the organization a member belongs to.
pub type OrganizationId = u32;

/// Cost in tenths of a price unit (a price of 5.5 is stored as 55).
pub type Cost = i64;

/// One of the four fixed roster roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    /// All roles, in roster order.
    pub const ALL: [Role; 4] = [
        Role::Goalkeeper,
        Role::Defender,
        Role::Midfielder,
        Role::Forward,
    ];

    /// Position of this role in per-role arrays.
    pub fn index(self) -> usize {
        match self {
            Role::Goalkeeper => 0,
            Role::Defender => 1,
            Role::Midfielder => 2,
            Role::Forward => 3,
        }
    }

    /// Number of roster slots for this role.
    pub fn required(self) -> usize {
        match self {
            Role::Goalkeeper => 2,
            Role::Defender => 5,
            Role::Midfielder => 5,
            Role::Forward => 3,
        }
    }

    /// Target share of total roster cost spent on this role.
    pub fn ideal_cost_share(self) -> f64 {
        match self {
            Role::Goalkeeper => 0.08,
            Role::Defender => 0.28,
            Role::Midfielder => 0.38,
            Role::Forward => 0.26,
        }
    }

    /// Scoring tendency applied to the secondary prediction.
    pub fn prediction_multiplier(self) -> f64 {
        match self {
            Role::Goalkeeper => 0.7,
            Role::Defender => 0.8,
            Role::Midfielder => 1.0,
            Role::Forward => 1.1,
        }
    }

    pub fn is_attacking(self) -> bool {
        matches!(self, Role::Midfielder | Role::Forward)
    }

    pub fn is_defensive(self) -> bool {
        matches!(self, Role::Goalkeeper | Role::Defender)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Goalkeeper => "goalkeeper",
            Role::Defender => "defender",
            Role::Midfielder => "midfielder",
            Role::Forward => "forward",
        };
        f.write_str(name)
    }
}

/// Availability status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Availability {
    #[default]
    Available,
    Doubtful,
    Injured,
    Suspended,
}

impl Availability {
    /// Fraction of a member's valuation removed for this status.
    pub fn penalty(self) -> f64 {
        match self {
            Availability::Available => 0.0,
            Availability::Doubtful => 0.5,
            Availability::Injured => 0.8,
            Availability::Suspended => 1.0,
        }
    }

    /// Status implied by a reported chance of playing, in percent.
    ///
    /// 0 is `Injured`, below 75 is `Doubtful`, anything else `Available`.
    pub fn from_chance(percent: u8) -> Self {
        match percent {
            0 => Availability::Injured,
            1..=74 => Availability::Doubtful,
            _ => Availability::Available,
        }
    }
}

/// Cumulative season statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonStats {
    pub total_points: i32,
    pub starts: u32,
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub bonus: u32,
    pub influence: f64,
}

/// A candidate that can fill one roster slot.
///
/// Members are immutable for the duration of a run; rosters share them
/// through `Arc`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub id: MemberId,
    pub role: Role,
    pub organization: OrganizationId,
    pub cost: Cost,
    /// Recent-form score (average points over recent fixtures).
    pub form: f64,
    /// Percentage of managers selecting this member (0–100).
    pub ownership: f64,
    pub stats: SeasonStats,
    pub status: Option<Availability>,
    /// Reported chance of playing next round, in percent. Used for
    /// availability when neither an override nor `status` is set.
    pub chance_of_playing: Option<u8>,
    /// Penalty-taker rank. Carried through for callers; not scored.
    pub penalties_order: Option<u8>,
}

impl Member {
    /// Creates a member with zeroed statistics.
    pub fn new(id: MemberId, role: Role, organization: OrganizationId, cost: Cost) -> Self {
        Self {
            id,
            role,
            organization,
            cost,
            form: 0.0,
            ownership: 0.0,
            stats: SeasonStats::default(),
            status: None,
            chance_of_playing: None,
            penalties_order: None,
        }
    }

    pub fn with_form(mut self, form: f64) -> Self {
        self.form = form;
        self
    }

    pub fn with_ownership(mut self, ownership: f64) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn with_total_points(mut self, points: i32) -> Self {
        self.stats.total_points = points;
        self
    }

    pub fn with_stats(mut self, stats: SeasonStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_status(mut self, status: Availability) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_chance_of_playing(mut self, percent: u8) -> Self {
        self.chance_of_playing = Some(percent);
        self
    }

    pub fn with_penalties_order(mut self, order: u8) -> Self {
        self.penalties_order = Some(order);
        self
    }

    /// Season points per start, treating zero starts as one.
    pub fn points_per_game(&self) -> f64 {
        f64::from(self.stats.total_points) / f64::from(self.stats.starts.max(1))
    }
}

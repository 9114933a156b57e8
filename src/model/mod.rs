//! Roster data model.
//!
//! - [`Member`]: an immutable candidate with role, organization, cost and statistics
//! - [`Constraints`]: budget ceiling and valuation [`Strategy`]
//! - [`RolePool`]: the candidate pool of a run, grouped by [`Role`]
//! - [`Roster`]: the 15-slot selection, grouped by [`Role`]

mod constraints;
mod member;
mod pool;
mod roster;

pub use constraints::{Constraints, Strategy};
pub use member::{Availability, Cost, Member, MemberId, OrganizationId, Role, SeasonStats};
pub use pool::RolePool;
pub use roster::{Roster, MAX_PER_ORGANIZATION, SQUAD_SIZE};

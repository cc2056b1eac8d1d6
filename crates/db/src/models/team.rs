//! Team entity model and DTOs.

use roster_core::counters::GenderTally;
use roster_core::enums::ProjectType;
use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A team row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub project_type: ProjectType,
    /// Cached; maintained by the participant write paths.
    pub male_count: i32,
    /// Cached; maintained by the participant write paths.
    pub female_count: i32,
    pub location_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Team {
    /// The cached counters as a tally.
    pub fn tally(&self) -> GenderTally {
        GenderTally {
            male_count: self.male_count,
            female_count: self.female_count,
        }
    }
}

/// DTO for creating or fully replacing a team.
///
/// The gender counters are derived and never accepted from callers.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeam {
    #[validate(custom(function = "roster_core::validation::not_blank"))]
    pub name: String,
    pub project_type: ProjectType,
    pub location_id: DbId,
}

/// Full-record update: every writable field is replaced.
pub type UpdateTeam = CreateTeam;

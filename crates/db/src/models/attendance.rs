//! Attendance entity model and DTOs.

use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An attendance row: one participant was present at one action.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub action_id: DbId,
    pub participant_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording attendance.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttendance {
    pub action_id: DbId,
    pub participant_id: DbId,
}

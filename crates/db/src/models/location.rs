//! Location entity model and DTOs.

use roster_core::enums::Wing;
use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub wing: Wing,
    /// Number of teams the location is meant to host. Advisory only.
    pub capacity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a location.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLocation {
    #[validate(custom(function = "roster_core::validation::not_blank"))]
    pub name: String,
    pub wing: Wing,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub capacity: i32,
}

/// Full-record update: every writable field is replaced.
pub type UpdateLocation = CreateLocation;

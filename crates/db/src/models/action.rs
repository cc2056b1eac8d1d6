//! Action (session / event) entity model and DTOs.

use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An action row from the `actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Action {
    pub id: DbId,
    pub title: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing an action.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAction {
    #[validate(custom(function = "roster_core::validation::not_blank"))]
    pub title: String,
    /// Defaults to `true` if omitted.
    #[serde(default = "default_valid")]
    pub valid: bool,
}

/// Full-record update: every writable field is replaced.
pub type UpdateAction = CreateAction;

fn default_valid() -> bool {
    true
}

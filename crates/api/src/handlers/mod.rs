//! HTTP handlers, one module per resource.
//!
//! Writes check their parent references here before touching storage, so
//! a dangling reference is reported as a validation failure and nothing
//! is written.

pub mod action;
pub mod attendance;
pub mod location;
pub mod participant;
pub mod team;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::error::CoreError;
use roster_core::types::DbId;
use roster_db::repositories::{ActionRepo, LocationRepo, ParticipantRepo, TeamRepo};
use roster_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;

fn dangling(field: &str, entity: &str, id: DbId) -> CoreError {
    CoreError::Validation(format!("{field} {id} does not reference an active {entity}"))
}

pub(crate) async fn ensure_active_location(pool: &DbPool, id: DbId) -> AppResult<()> {
    match LocationRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(dangling("location_id", "location", id).into()),
    }
}

pub(crate) async fn ensure_active_team(pool: &DbPool, id: DbId) -> AppResult<()> {
    match TeamRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(dangling("team_id", "team", id).into()),
    }
}

pub(crate) async fn ensure_active_participant(pool: &DbPool, id: DbId) -> AppResult<()> {
    match ParticipantRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(dangling("participant_id", "participant", id).into()),
    }
}

pub(crate) async fn ensure_active_action(pool: &DbPool, id: DbId) -> AppResult<()> {
    match ActionRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(dangling("action_id", "action", id).into()),
    }
}

/// Response for a soft delete.
///
/// `200` with the stored row (carrying `deleted_at`) when the id has ever
/// existed, `204` when it never did. Deleting twice answers the same way.
pub(crate) fn deleted_response<T: Serialize>(record: Option<T>) -> Response {
    match record {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

//! Handlers for the `/actions` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use roster_core::types::DbId;
use roster_db::models::action::{Action, CreateAction, UpdateAction};
use roster_db::models::aggregate::{ActionWithAttendance, ActionWithFullData};
use roster_db::repositories::{ActionRepo, AggregateRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::handlers::deleted_response;
use crate::state::AppState;

/// POST /api/v1/actions
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateAction>,
) -> AppResult<(StatusCode, Json<Action>)> {
    let action = ActionRepo::create(&state.pool, &input).await?;
    tracing::info!(action_id = action.id, valid = action.valid, "Action created");
    Ok((StatusCode::CREATED, Json(action)))
}

/// GET /api/v1/actions
///
/// Every active action, valid or not, with attendance materialized down to
/// each participant's location.
pub async fn list_full(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActionWithFullData>>> {
    let actions = AggregateRepo::actions_with_full_data(&state.pool).await?;
    Ok(Json(actions))
}

/// GET /api/v1/actions/valid
pub async fn list_valid(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActionWithAttendance>>> {
    let actions = AggregateRepo::actions_valid_only(&state.pool).await?;
    Ok(Json(actions))
}

/// GET /api/v1/actions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Action>> {
    let action = ActionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Action", id))?;
    Ok(Json(action))
}

/// PUT /api/v1/actions/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateAction>,
) -> AppResult<Json<Action>> {
    let action = ActionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Action", id))?;
    Ok(Json(action))
}

/// DELETE /api/v1/actions/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<Response> {
    if ActionRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(action_id = id, "Action deleted");
    }
    let record = ActionRepo::find_by_id_include_deleted(&state.pool, id).await?;
    Ok(deleted_response(record))
}

//! Handlers for the `/teams` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use roster_core::error::CoreError;
use roster_core::types::DbId;
use roster_db::models::aggregate::TeamWithRoster;
use roster_db::models::team::{CreateTeam, Team, UpdateTeam};
use roster_db::repositories::{AggregateRepo, TeamRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::handlers::{deleted_response, ensure_active_location};
use crate::state::AppState;

/// POST /api/v1/teams
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    ensure_active_location(&state.pool, input.location_id).await?;
    let team = TeamRepo::create(&state.pool, &input).await?;
    tracing::info!(team_id = team.id, location_id = team.location_id, "Team created");
    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /api/v1/teams
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TeamWithRoster>>> {
    let teams = AggregateRepo::teams_with_roster(&state.pool).await?;
    Ok(Json(teams))
}

/// GET /api/v1/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<TeamWithRoster>> {
    let team = AggregateRepo::team_with_roster(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Team", id))?;
    Ok(Json(team))
}

/// PUT /api/v1/teams/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateTeam>,
) -> AppResult<Json<Team>> {
    ensure_active_location(&state.pool, input.location_id).await?;
    let team = TeamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Team", id))?;
    Ok(Json(team))
}

/// DELETE /api/v1/teams/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<Response> {
    if TeamRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(team_id = id, "Team deleted");
    }
    let record = TeamRepo::find_by_id_include_deleted(&state.pool, id).await?;
    Ok(deleted_response(record))
}

/// POST /api/v1/teams/{id}/recount
///
/// Rebuilds both gender counters from the team's active participants.
pub async fn recount(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<Json<Team>> {
    if !state.counts_genders() {
        return Err(CoreError::Validation(
            "Gender counting is disabled for this deployment".to_string(),
        )
        .into());
    }

    let before = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Team", id))?;
    let team = TeamRepo::recount(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Team", id))?;

    if before.tally() != team.tally() {
        tracing::warn!(
            team_id = id,
            male_before = before.male_count,
            female_before = before.female_count,
            male_after = team.male_count,
            female_after = team.female_count,
            "Team gender counters drifted, repaired by recount"
        );
    }
    Ok(Json(team))
}

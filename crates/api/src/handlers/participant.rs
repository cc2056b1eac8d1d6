//! Handlers for the `/participants` resource.
//!
//! Every write is checked against the deployment's roster schema before
//! it reaches storage, and maintains team gender counters when enabled.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use roster_core::types::DbId;
use roster_db::models::aggregate::ParticipantWithTeam;
use roster_db::models::participant::{CreateParticipant, Participant, UpdateParticipant};
use roster_db::repositories::{AggregateRepo, ParticipantRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::handlers::{deleted_response, ensure_active_team};
use crate::state::AppState;

/// Schema and reference checks shared by create and update.
async fn check_write(state: &AppState, input: &CreateParticipant) -> AppResult<()> {
    state
        .config
        .roster
        .schema
        .field_set()
        .validate(&input.fields())?;
    ensure_active_team(&state.pool, input.team_id).await
}

/// POST /api/v1/participants
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateParticipant>,
) -> AppResult<(StatusCode, Json<Participant>)> {
    check_write(&state, &input).await?;
    let participant = ParticipantRepo::create(&state.pool, &input, state.counts_genders()).await?;
    tracing::info!(
        participant_id = participant.id,
        team_id = participant.team_id,
        "Participant created"
    );
    Ok((StatusCode::CREATED, Json(participant)))
}

/// GET /api/v1/participants
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ParticipantWithTeam>>> {
    let participants = AggregateRepo::participants_with_team(&state.pool).await?;
    Ok(Json(participants))
}

/// GET /api/v1/participants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ParticipantWithTeam>> {
    let participant = AggregateRepo::participant_with_team(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Participant", id))?;
    Ok(Json(participant))
}

/// PUT /api/v1/participants/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateParticipant>,
) -> AppResult<Json<Participant>> {
    check_write(&state, &input).await?;
    let participant = ParticipantRepo::update(&state.pool, id, &input, state.counts_genders())
        .await?
        .ok_or(AppError::not_found("Participant", id))?;
    Ok(Json(participant))
}

/// DELETE /api/v1/participants/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<Response> {
    if let Some(deleted) =
        ParticipantRepo::soft_delete(&state.pool, id, state.counts_genders()).await?
    {
        tracing::info!(
            participant_id = id,
            team_id = deleted.team_id,
            "Participant deleted"
        );
        return Ok(deleted_response(Some(deleted)));
    }
    let record = ParticipantRepo::find_by_id_include_deleted(&state.pool, id).await?;
    Ok(deleted_response(record))
}

//! Handlers for the `/locations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use roster_core::types::DbId;
use roster_db::models::aggregate::LocationWithTeams;
use roster_db::models::location::{CreateLocation, Location, UpdateLocation};
use roster_db::repositories::{AggregateRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::handlers::deleted_response;
use crate::state::AppState;

/// POST /api/v1/locations
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let location = LocationRepo::create(&state.pool, &input).await?;
    tracing::info!(location_id = location.id, "Location created");
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /api/v1/locations
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LocationWithTeams>>> {
    let locations = AggregateRepo::locations_with_teams(&state.pool).await?;
    Ok(Json(locations))
}

/// GET /api/v1/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<LocationWithTeams>> {
    let location = AggregateRepo::location_with_teams(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Location", id))?;
    Ok(Json(location))
}

/// PUT /api/v1/locations/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = LocationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Location", id))?;
    Ok(Json(location))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<Response> {
    if LocationRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(location_id = id, "Location deleted");
    }
    let record = LocationRepo::find_by_id_include_deleted(&state.pool, id).await?;
    Ok(deleted_response(record))
}

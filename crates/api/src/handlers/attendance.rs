//! Handlers for the `/attendance` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::attendance::RecordOutcome;
use roster_core::types::DbId;
use roster_db::models::aggregate::AttendanceWithContext;
use roster_db::models::attendance::CreateAttendance;
use roster_db::repositories::{AggregateRepo, AttendanceRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::handlers::{deleted_response, ensure_active_action, ensure_active_participant};
use crate::query::RecordAttendanceParams;
use crate::state::AppState;

/// POST /api/v1/attendance?allow_duplicates=true|false
///
/// `201` with the new row, or `304` with a `Location` header pointing at
/// the row that already records this participant for this action.
pub async fn create(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RecordAttendanceParams>,
    ValidatedJson(input): ValidatedJson<CreateAttendance>,
) -> AppResult<Response> {
    ensure_active_action(&state.pool, input.action_id).await?;
    ensure_active_participant(&state.pool, input.participant_id).await?;

    match AttendanceRepo::record(&state.pool, &input, params.policy()).await? {
        RecordOutcome::Created(attendance) => {
            tracing::info!(
                attendance_id = attendance.id,
                action_id = attendance.action_id,
                participant_id = attendance.participant_id,
                "Attendance recorded"
            );
            Ok((StatusCode::CREATED, Json(attendance)).into_response())
        }
        RecordOutcome::Existing(attendance) => {
            tracing::debug!(
                attendance_id = attendance.id,
                action_id = attendance.action_id,
                participant_id = attendance.participant_id,
                "Attendance already recorded"
            );
            let location = format!("/api/v1/attendance/{}", attendance.id);
            Ok((StatusCode::NOT_MODIFIED, [(LOCATION, location)]).into_response())
        }
    }
}

/// GET /api/v1/attendance
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AttendanceWithContext>>> {
    let rows = AggregateRepo::attendance_list_with_context(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/v1/attendance/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<AttendanceWithContext>> {
    let row = AggregateRepo::attendance_with_context(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Attendance", id))?;
    Ok(Json(row))
}

/// DELETE /api/v1/attendance/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<Response> {
    if AttendanceRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(attendance_id = id, "Attendance deleted");
    }
    let record = AttendanceRepo::find_by_id_include_deleted(&state.pool, id).await?;
    Ok(deleted_response(record))
}

//! Route definitions for the `/teams` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/recount   -> recount
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(team::list).post(team::create))
        .route(
            "/{id}",
            get(team::get_by_id).put(team::update).delete(team::delete),
        )
        .route("/{id}/recount", post(team::recount))
}

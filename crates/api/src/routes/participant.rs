//! Route definitions for the `/participants` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::participant;
use crate::state::AppState;

/// Routes mounted at `/participants`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(participant::list).post(participant::create))
        .route(
            "/{id}",
            get(participant::get_by_id)
                .put(participant::update)
                .delete(participant::delete),
        )
}

//! Route definitions for the `/actions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::action;
use crate::state::AppState;

/// Routes mounted at `/actions`.
///
/// ```text
/// GET    /         -> list_full
/// POST   /         -> create
/// GET    /valid    -> list_valid
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(action::list_full).post(action::create))
        .route("/valid", get(action::list_valid))
        .route(
            "/{id}",
            get(action::get_by_id)
                .put(action::update)
                .delete(action::delete),
        )
}

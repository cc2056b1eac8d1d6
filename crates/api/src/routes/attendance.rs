//! Route definitions for the `/attendance` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET    /                           -> list
/// POST   /?allow_duplicates=<bool>   -> create
/// GET    /{id}                       -> get_by_id
/// DELETE /{id}                       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list).post(attendance::create))
        .route(
            "/{id}",
            get(attendance::get_by_id).delete(attendance::delete),
        )
}

pub mod action;
pub mod attendance;
pub mod health;
pub mod location;
pub mod participant;
pub mod team;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /locations                 list (with teams), create
/// /locations/{id}            get (with teams), update, delete
///
/// /teams                     list (with roster), create
/// /teams/{id}                get (with roster), update, delete
/// /teams/{id}/recount        recompute gender counters (POST)
///
/// /participants              list (with team), create
/// /participants/{id}         get (with team), update, delete
///
/// /attendance                list (with context), record
/// /attendance/{id}           get (with context), delete
///
/// /actions                   list (full data), create
/// /actions/valid             valid actions with attendance (GET)
/// /actions/{id}              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/locations", location::router())
        .nest("/teams", team::router())
        .nest("/participants", participant::router())
        .nest("/attendance", attendance::router())
        .nest("/actions", action::router())
}

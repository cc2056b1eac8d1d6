#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use roster_api::config::{DatabaseConfig, RosterConfig, ServerConfig};
use roster_api::router::build_app_router;
use roster_api::state::AppState;
use roster_core::schema::RosterSchema;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// The database section is never used to connect; tests hand in the pool
/// created by `#[sqlx::test]`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            name: "roster_test".to_string(),
            password: String::new(),
            max_connections: 5,
        },
        roster: RosterConfig::default(),
    }
}

/// Full application router on the default (gender) schema.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, RosterConfig::default())
}

/// Full application router with a specific roster configuration.
pub fn build_test_app_with(pool: PgPool, roster: RosterConfig) -> Router {
    let config = ServerConfig {
        roster,
        ..test_config()
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router on the batch schema (gender counting off).
pub fn build_batch_app(pool: PgPool) -> Router {
    build_test_app_with(
        pool,
        RosterConfig {
            schema: RosterSchema::Batch,
            gender_counting: true,
        },
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixtures (created through the API)
// ---------------------------------------------------------------------------

pub async fn create(pool: &PgPool, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "create {uri}: {json}");
    json
}

pub fn location_body(name: &str) -> serde_json::Value {
    serde_json::json!({"name": name, "wing": "CEF", "capacity": 3})
}

pub fn team_body(name: &str, location_id: i64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "project_type": "SOFTWARE",
        "location_id": location_id,
    })
}

pub fn participant_body(name: &str, gender: &str, team_id: i64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phone": "9876543210",
        "gender": gender,
        "department": "IT",
        "shirt_size": "M",
        "team_id": team_id,
    })
}

pub async fn seed_location(pool: &PgPool, name: &str) -> i64 {
    create(pool, "/api/v1/locations", location_body(name)).await["id"]
        .as_i64()
        .unwrap()
}

pub async fn seed_team(pool: &PgPool, name: &str) -> i64 {
    let location_id = seed_location(pool, &format!("{name} Lab")).await;
    create(pool, "/api/v1/teams", team_body(name, location_id)).await["id"]
        .as_i64()
        .unwrap()
}

pub async fn seed_participant(pool: &PgPool, name: &str, gender: &str, team_id: i64) -> i64 {
    create(
        pool,
        "/api/v1/participants",
        participant_body(name, gender, team_id),
    )
    .await["id"]
        .as_i64()
        .unwrap()
}

pub async fn seed_action(pool: &PgPool, title: &str, valid: bool) -> i64 {
    create(
        pool,
        "/api/v1/actions",
        serde_json::json!({"title": title, "valid": valid}),
    )
    .await["id"]
        .as_i64()
        .unwrap()
}

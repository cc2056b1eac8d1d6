//! HTTP-level tests for the `/locations` resource and the shared delete
//! semantics.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_location_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/locations", common::location_body("Lab 1")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Lab 1");
    assert_eq!(json["wing"], "CEF");
    assert!(json["id"].is_number());
    assert!(json.get("deleted_at").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_wing_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/locations",
        serde_json::json!({"name": "Lab", "wing": "NORTH", "capacity": 2}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_name_and_zero_capacity_fail_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/locations",
        serde_json::json!({"name": "   ", "wing": "IT", "capacity": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("name"), "{message}");
    assert!(message.contains("capacity"), "{message}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_is_bad_request(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/locations")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_location_includes_active_teams(pool: PgPool) {
    let location_id = common::seed_location(&pool, "Hall").await;
    let kept = common::create(
        &pool,
        "/api/v1/teams",
        common::team_body("Kept", location_id),
    )
    .await;
    let dropped = common::create(
        &pool,
        "/api/v1/teams",
        common::team_body("Dropped", location_id),
    )
    .await;
    let dropped_id = dropped["id"].as_i64().unwrap();
    delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/teams/{dropped_id}"),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/locations/{location_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Hall");
    let teams = json["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["id"], kept["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_locations_in_insertion_order(pool: PgPool) {
    let a = common::seed_location(&pool, "A").await;
    let b = common::seed_location(&pool, "B").await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/locations").await).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(json[1]["teams"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_location_replaces_record(pool: PgPool) {
    let id = common::seed_location(&pool, "Before").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/locations/{id}"),
        serde_json::json!({"name": "After", "wing": "MCA", "capacity": 8}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "After");
    assert_eq!(json["wing"], "MCA");
    assert_eq!(json["capacity"], 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_is_rejected(pool: PgPool) {
    let id = common::seed_location(&pool, "Partial").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/locations/{id}"),
        serde_json::json!({"name": "Only name"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_location_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/locations/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Delete semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_record_with_deleted_at(pool: PgPool) {
    let id = common::seed_location(&pool, "Doomed").await;
    let uri = format!("/api/v1/locations/{id}");

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["id"], id);
    assert!(first["deleted_at"].is_string());

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK, "repeat delete is idempotent");
    let second = body_json(response).await;
    assert_eq!(second["deleted_at"], first["deleted_at"]);

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_never_existing_returns_204(pool: PgPool) {
    let response = delete(common::build_test_app(pool), "/api/v1/locations/424242").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_location_cannot_host_new_team(pool: PgPool) {
    let id = common::seed_location(&pool, "Closed").await;
    delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/locations/{id}"),
    )
    .await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/teams",
        common::team_body("Late", id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("location_id"));
}

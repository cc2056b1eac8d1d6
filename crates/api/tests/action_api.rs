//! HTTP-level tests for the `/actions` resource and its aggregate views.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn attend(pool: &PgPool, action_id: i64, participant_id: i64) {
    common::create(
        pool,
        "/api/v1/attendance",
        serde_json::json!({"action_id": action_id, "participant_id": participant_id}),
    )
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_action_defaults_to_valid(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/actions",
        serde_json::json!({"title": "Opening"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Opening");
    assert_eq!(json["valid"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_fails_validation(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/actions",
        serde_json::json!({"title": "  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_action_is_plain_record(pool: PgPool) {
    let id = common::seed_action(&pool, "Plain", false).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/actions/{id}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["id"], id);
    assert_eq!(json["valid"], false);
    assert!(json.get("attendance").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_action_toggles_valid(pool: PgPool) {
    let id = common::seed_action(&pool, "Toggle", true).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{id}"),
        serde_json::json!({"title": "Toggle", "valid": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["valid"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_valid_view_skips_invalid_actions(pool: PgPool) {
    let team_id = common::seed_team(&pool, "Viewers").await;
    let p = common::seed_participant(&pool, "Waqar", "MALE", team_id).await;
    let valid = common::seed_action(&pool, "Keynote", true).await;
    let invalid = common::seed_action(&pool, "Cancelled", false).await;
    attend(&pool, valid, p).await;
    attend(&pool, invalid, p).await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/actions/valid").await).await;
    let actions = json.as_array().unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["id"], valid);
    let rows = actions[0]["attendance"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["action"]["id"], valid);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_data_view_reaches_location(pool: PgPool) {
    let team_id = common::seed_team(&pool, "Deep").await;
    let p = common::seed_participant(&pool, "Xavier", "MALE", team_id).await;
    let open = common::seed_action(&pool, "Open", true).await;
    let closed = common::seed_action(&pool, "Closed", false).await;
    attend(&pool, open, p).await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/actions").await).await;
    let actions = json.as_array().unwrap();
    assert_eq!(actions.len(), 2);

    assert_eq!(actions[0]["id"], open);
    let row = &actions[0]["attendance"][0];
    assert_eq!(row["participant"]["name"], "Xavier");
    assert_eq!(row["participant"]["team"]["name"], "Deep");
    assert_eq!(row["participant"]["team"]["location"]["name"], "Deep Lab");

    assert_eq!(actions[1]["id"], closed);
    assert_eq!(actions[1]["attendance"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_action_leaves_views(pool: PgPool) {
    let id = common::seed_action(&pool, "Retired", true).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/actions/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let full = body_json(get(common::build_test_app(pool.clone()), "/api/v1/actions").await).await;
    assert_eq!(full, serde_json::json!([]));

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

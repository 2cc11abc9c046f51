//! Authentication, ownership and id validation across routes.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get, get_auth, post_json_auth, token_for};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_returns_401(pool: PgPool) {
    let user_id = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/users/{user_id}/streak")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_returns_401(pool: PgPool) {
    let user_id = create_user(&pool, "ben").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/users/{user_id}/score"), "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_users_path_returns_403(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let ben = create_user(&pool, "ben").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/users/{ben}/score"), &token_for(ann)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_users_goal_returns_403_and_missing_goal_404(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let ben = create_user(&pool, "ben").await;
    let app = common::build_test_app(pool);

    let target_date = (chrono::Utc::now() + chrono::Duration::days(30)).to_rfc3339();
    let created = post_json_auth(
        app.clone(),
        &format!("/api/v1/users/{ann}/goals"),
        &token_for(ann),
        json!({
            "type": "LOSE_WEIGHT",
            "target_date": target_date,
            "start_value": 90.0,
            "target_value": 80.0,
            "unit": "kg"
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let goal_id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/goals/{goal_id}"), &token_for(ben)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, "/api/v1/goals/999999", &token_for(ben)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_ids_return_400_invalid_id(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);
    let token = token_for(ann);

    for uri in [
        "/api/v1/users/abc/streak",
        "/api/v1/users/0/score",
        "/api/v1/users/-5/goals",
    ] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_ID", "{uri}");
    }

    let response = delete_auth(app, "/api/v1/workouts/xyz", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_for_deleted_user_gets_404_on_lazy_rows(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);
    let token = token_for(ann);

    let response = delete_auth(app.clone(), &format!("/api/v1/users/{ann}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The streak row would be created lazily; the user no longer exists.
    let response = get_auth(app, &format!("/api/v1/users/{ann}/streak"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

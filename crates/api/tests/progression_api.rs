//! Streak, points and daily log endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_user, get_auth, post_json_auth, token_for};
use serde_json::json;
use pulsefit_db::repositories::StreakRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Streak
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn streak_from_yesterday_reads_as_in_grace(pool: PgPool) {
    let user = create_user(&pool, "bea").await;
    StreakRepo::modify::<_, _, sqlx::Error>(&pool, user, |s| {
        s.current_streak = 3;
        s.longest_streak = 3;
        s.last_activity_date = Some(Utc::now() - Duration::hours(24));
        Ok((true, ()))
    })
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/users/{user}/streak"), &token_for(user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["in_grace_period"], true);
    assert_eq!(json["data"]["current_streak"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_user_streak_is_inactive(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/users/{user}/streak"), &token_for(user)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "inactive");
    assert_eq!(json["data"]["current_streak"], 0);
    assert_eq!(json["data"]["minimum_steps_threshold"], 3000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn workout_activity_starts_streak_and_repeat_is_same_day(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);
    let token = token_for(user);
    let uri = format!("/api/v1/users/{user}/streak/activity");

    let first = post_json_auth(app.clone(), &uri, &token, json!({"activity_type": "workout"})).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;
    assert_eq!(first["data"]["outcome"], "started");
    assert_eq!(first["data"]["current_streak"], 1);
    assert_eq!(first["data"]["longest_streak"], 1);

    let again = post_json_auth(app.clone(), &uri, &token, json!({"activity_type": "workout"})).await;
    let again = body_json(again).await;
    assert_eq!(again["data"]["outcome"], "same_day");
    assert_eq!(again["data"]["current_streak"], 1);

    let status = get_auth(app, &format!("/api/v1/users/{user}/streak"), &token).await;
    let status = body_json(status).await;
    assert_eq!(status["data"]["status"], "active_today");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn low_step_count_does_not_qualify(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{user}/streak/activity"),
        &token_for(user),
        json!({"activity_type": "steps", "value": 1200}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["outcome"], "not_qualifying");
    assert_eq!(json["data"]["current_streak"], 0);
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn points_are_capped_per_day(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);
    let token = token_for(user);
    let uri = format!("/api/v1/users/{user}/score/points");

    let response = post_json_auth(app.clone(), &uri, &token, json!({"action": "bonus", "points": 290})).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["points_added"], 290);
    assert_eq!(json["data"]["level"], 2);
    assert_eq!(json["data"]["leveled_up"], true);

    let response = post_json_auth(app.clone(), &uri, &token, json!({"action": "bonus", "points": 50})).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["points_added"], 10);
    assert_eq!(json["data"]["daily_points"], 300);
    assert_eq!(json["data"]["total_score"], 300);

    let response = post_json_auth(app.clone(), &uri, &token, json!({"action": "bonus", "points": 5})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], false);
    assert_eq!(json["data"]["points_added"], 0);
    assert_eq!(json["data"]["total_score"], 300);

    let score = get_auth(app, &format!("/api/v1/users/{user}/score"), &token).await;
    let score = body_json(score).await;
    assert_eq!(score["data"]["remaining_today"], 0);
    assert_eq!(score["data"]["score_history"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_positive_points_are_rejected(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{user}/score/points"),
        &token_for(user),
        json!({"action": "bonus", "points": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Daily logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn steps_log_awards_points_and_starts_streak(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{user}/logs"),
        &token_for(user),
        json!({"type": "steps", "value": 3500}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], true);
    assert_eq!(json["data"]["log"]["kind"], "steps");
    assert_eq!(json["data"]["log"]["unit"], "steps");
    assert_eq!(json["data"]["points"]["points_added"], 30);
    assert_eq!(json["data"]["streak"]["outcome"], "started");
    assert_eq!(json["data"]["streak"]["current_streak"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn relogging_same_day_overwrites_value(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);
    let token = token_for(user);
    let uri = format!("/api/v1/users/{user}/logs");

    let first = post_json_auth(app.clone(), &uri, &token, json!({"type": "water", "value": 1500, "unit": "ml"})).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;
    assert_eq!(first["data"]["log"]["kind"], "water_intake");
    assert_eq!(first["data"]["points"]["points_added"], 15);
    assert!(first["data"]["streak"].is_null());

    let second = post_json_auth(app.clone(), &uri, &token, json!({"type": "water_intake", "value": 2000})).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;
    assert_eq!(second["data"]["created"], false);
    assert_eq!(second["data"]["log"]["value"], 2000.0);

    let list = get_auth(app, &format!("{uri}?type=water"), &token).await;
    assert_eq!(list.status(), StatusCode::OK);
    let list = body_json(list).await;
    let logs = list["data"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["value"], 2000.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_logs_are_rejected(pool: PgPool) {
    let user = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);
    let token = token_for(user);
    let uri = format!("/api/v1/users/{user}/logs");

    let response = post_json_auth(app.clone(), &uri, &token, json!({"type": "calories", "value": 10})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(app.clone(), &uri, &token, json!({"type": "weight", "value": -3})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, &format!("{uri}?start_date=2024-03-05&end_date=2024-03-01"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

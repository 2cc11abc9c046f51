//! Profile visibility, leaderboard, level sync and account deletion.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get_auth, post_json_auth, put_json_auth, token_for};
use pulsefit_api::router::build_app_router;
use pulsefit_db::repositories::{GoalRepo, ProfileRepo, WorkoutRepo};
use pulsefit_events::ProfileSync;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_ranks_public_profiles_only(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let ben = create_user(&pool, "ben").await;
    let cat = create_user(&pool, "cat").await;
    ProfileRepo::sync_level(&pool, ann, 2, 200).await.unwrap();
    ProfileRepo::sync_level(&pool, ben, 4, 400).await.unwrap();
    ProfileRepo::sync_level(&pool, cat, 9, 900).await.unwrap();
    let app = common::build_test_app(pool);

    for user in [ann, ben] {
        let response = put_json_auth(
            app.clone(),
            &format!("/api/v1/users/{user}/profile/visibility"),
            &token_for(user),
            json!({"public_profile": true}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(app, "/api/v1/leaderboard/global", &token_for(ann)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();

    // cat is private and never listed.
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "ben");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["is_current_user"], false);
    assert_eq!(entries[1]["name"], "ann");
    assert_eq!(entries[1]["is_current_user"], true);
    assert_eq!(entries[1]["streak"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_board_is_rejected(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/leaderboard/weekly", &token_for(ann)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Level sync
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn awarded_points_reach_the_profile(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let state = common::test_state(pool.clone());
    let sync = tokio::spawn(ProfileSync::run(pool.clone(), state.event_bus.subscribe()));
    let app = build_app_router(state, &common::test_config());
    let token = token_for(ann);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/users/{ann}/score/points"),
        &token,
        json!({"action": "bonus", "points": 100}),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["level"], 2);

    let mut synced = false;
    for _ in 0..40 {
        let response = get_auth(app.clone(), &format!("/api/v1/users/{ann}/profile"), &token).await;
        let json = body_json(response).await;
        if json["data"]["level"] == 2 {
            assert_eq!(json["data"]["experience_points"], 200);
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(synced, "profile level should follow the ledger");

    sync.abort();
}

// ---------------------------------------------------------------------------
// Account deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_account_removes_owned_rows(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool.clone());
    let token = token_for(ann);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/users/{ann}/workouts"),
        &token,
        json!({"name": "Run"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(app.clone(), &format!("/api/v1/users/{ann}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(WorkoutRepo::list_by_user(&pool, ann).await.unwrap().is_empty());
    assert!(GoalRepo::list_by_user(&pool, ann).await.unwrap().is_empty());
    assert!(ProfileRepo::find_by_user(&pool, ann).await.unwrap().is_none());

    let response = delete_auth(app, &format!("/api/v1/users/{ann}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

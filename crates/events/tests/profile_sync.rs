use std::time::Duration;

use pulsefit_db::models::user::CreateUser;
use pulsefit_db::repositories::{ProfileRepo, UserRepo};
use pulsefit_events::{EventBus, ProfileSync, ProgressEvent};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
        },
    )
    .await
    .unwrap()
    .id
}

/// Poll the profile until its level matches, or give up after ~2s.
async fn wait_for_level(pool: &PgPool, user_id: i64, level: i32) -> bool {
    for _ in 0..40 {
        let profile = ProfileRepo::find_by_user(pool, user_id).await.unwrap();
        if profile.is_some_and(|p| p.level == level) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_points_event_syncs_profile(pool: PgPool) {
    let user_id = new_user(&pool, "kim").await;
    let bus = EventBus::default();
    let handle = tokio::spawn(ProfileSync::run(pool.clone(), bus.subscribe()));

    bus.publish(ProgressEvent::PointsAwarded {
        user_id,
        action: "add_workout".to_string(),
        points: 100,
        total_score: 400,
        level: 3,
        leveled_up: true,
    });

    assert!(wait_for_level(&pool, user_id, 3).await);
    let profile = ProfileRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(profile.experience_points, 300);

    drop(bus);
    handle.await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_sync_does_not_stop_the_loop(pool: PgPool) {
    let user_id = new_user(&pool, "lou").await;
    let bus = EventBus::default();
    let handle = tokio::spawn(ProfileSync::run(pool.clone(), bus.subscribe()));

    // Unknown user: the FK insert fails and is only logged.
    bus.publish(ProgressEvent::ScoreObserved { user_id: 999_999, level: 2 });
    bus.publish(ProgressEvent::ScoreObserved { user_id, level: 5 });

    assert!(wait_for_level(&pool, user_id, 5).await);

    drop(bus);
    handle.await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_direct_sync_sets_experience(pool: PgPool) {
    let user_id = new_user(&pool, "max").await;
    ProfileSync::sync(&pool, user_id, 6).await.unwrap();
    let profile = ProfileRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(profile.level, 6);
    assert_eq!(profile.experience_points, 600);
}

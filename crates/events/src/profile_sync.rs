//! Background level sync from the points ledger to the user profile.
//!
//! [`ProfileSync`] subscribes to the [`EventBus`](crate::bus::EventBus) and,
//! for every event carrying a ledger level, upserts `level` and
//! `experience_points` into `user_profiles`. Failures are logged and never
//! reach the request that produced the event.

use pulsefit_core::points::experience_for_level;
use pulsefit_core::types::DbId;
use pulsefit_db::repositories::ProfileRepo;
use pulsefit_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::PublishedEvent;

/// Background service that mirrors ledger levels into profiles.
pub struct ProfileSync;

impl ProfileSync {
    /// Run the sync loop until the bus is dropped.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PublishedEvent>) {
        loop {
            match receiver.recv().await {
                Ok(published) => {
                    let Some(level) = published.event.level() else {
                        continue;
                    };
                    let user_id = published.event.user_id();
                    if let Err(e) = Self::sync(&pool, user_id, level).await {
                        tracing::warn!(
                            error = %e,
                            user_id,
                            level,
                            event = published.event.name(),
                            "Failed to sync level to user profile"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Profile sync lagged, some levels were not synced");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, profile sync shutting down");
                    break;
                }
            }
        }
    }

    /// Upsert one user's level and derived experience points.
    pub async fn sync(pool: &DbPool, user_id: DbId, level: i32) -> Result<(), sqlx::Error> {
        ProfileRepo::sync_level(pool, user_id, level, experience_for_level(level)).await?;
        tracing::debug!(user_id, level, "Synced level to user profile");
        Ok(())
    }
}

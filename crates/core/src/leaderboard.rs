//! Public leaderboard ranking.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// The only board currently offered.
pub const GLOBAL_BOARD: &str = "global";

/// A public profile as fed into the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contender {
    pub user_id: DbId,
    pub name: String,
    pub level: i32,
    pub experience_points: i64,
    pub streak: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: DbId,
    pub name: String,
    pub level: i32,
    pub experience_points: i64,
    pub streak: i32,
    pub is_current_user: bool,
}

/// Validate a board name from the request path.
pub fn validate_board(board: &str) -> Result<(), CoreError> {
    if board == GLOBAL_BOARD {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid leaderboard type: '{board}'"
        )))
    }
}

/// Rank contenders by level, then streak, then user id, flagging `viewer`.
pub fn rank(mut contenders: Vec<Contender>, viewer: DbId) -> Vec<LeaderboardEntry> {
    contenders.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then_with(|| b.streak.cmp(&a.streak))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    contenders
        .into_iter()
        .enumerate()
        .map(|(i, c)| LeaderboardEntry {
            rank: i + 1,
            is_current_user: c.user_id == viewer,
            user_id: c.user_id,
            name: c.name,
            level: c.level,
            experience_points: c.experience_points,
            streak: c.streak,
        })
        .collect()
}

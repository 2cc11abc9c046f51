//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.
//!
//! Read-modify-write operations (`modify`) run inside a transaction that
//! locks the row with `SELECT ... FOR UPDATE`, hand the decoded state to a
//! synchronous closure, and write the result back before committing. An
//! error from the closure drops the transaction, rolling it back.

pub mod daily_log_repo;
pub mod goal_repo;
pub mod profile_repo;
pub mod score_repo;
pub mod streak_repo;
pub mod user_repo;
pub mod workout_repo;

pub use daily_log_repo::DailyLogRepo;
pub use goal_repo::GoalRepo;
pub use profile_repo::ProfileRepo;
pub use score_repo::ScoreRepo;
pub use streak_repo::StreakRepo;
pub use user_repo::UserRepo;
pub use workout_repo::WorkoutRepo;

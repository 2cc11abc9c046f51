pub mod goals;
pub mod leaderboard;
pub mod logs;
pub mod score;
pub mod streak;
pub mod users;
pub mod workouts;

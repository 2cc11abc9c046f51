//! Domain logic for the pulsefit backend.
//!
//! Everything in this crate is pure: no I/O, no async, no database types.
//! The `db` and `api` crates load rows, call into these modules, and persist
//! whatever comes back.

pub mod calendar;
pub mod daily_log;
pub mod error;
pub mod goal;
pub mod leaderboard;
pub mod points;
pub mod streak;
pub mod types;
pub mod workout;

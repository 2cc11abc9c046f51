//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the request bodies that create or change it
//! - Conversions to and from the pure domain types in `pulsefit_core`

pub mod daily_log;
pub mod goal;
pub mod score;
pub mod streak;
pub mod user;
pub mod user_profile;
pub mod workout;

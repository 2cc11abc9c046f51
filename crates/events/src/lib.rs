//! Progression event bus and its background subscribers.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ProgressEvent`]: what happened to a user's streak, points or goals.
//! - [`ProfileSync`]: background service mirroring the ledger level into
//!   the user's public profile.
//! - [`ActivityAudit`]: structured log line for every event.

pub mod audit;
pub mod bus;
pub mod profile_sync;

pub use audit::ActivityAudit;
pub use bus::{EventBus, ProgressEvent, PublishedEvent};
pub use profile_sync::ProfileSync;

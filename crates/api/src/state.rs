use std::sync::Arc;

use pulsefit_core::calendar::Calendar;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pulsefit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bus for progression events (profile level sync subscribes to it).
    pub event_bus: Arc<pulsefit_events::EventBus>,
}

impl AppState {
    /// The configured day boundary.
    pub fn calendar(&self) -> &Calendar {
        &self.config.calendar
    }
}

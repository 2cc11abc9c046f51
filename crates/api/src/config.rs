use std::net::{IpAddr, SocketAddr};

use pulsefit_core::calendar::Calendar;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("DAY_BOUNDARY_OFFSET_MINUTES: {0}")]
    Calendar(#[from] pulsefit_core::error::CoreError),
}

/// Read `name`, falling back to `default`, and parse it.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

/// Comma-separated origin list; blank entries are dropped.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

/// Everything the API process needs before it can bind.
///
/// | Variable                      | Default                 |
/// |-------------------------------|-------------------------|
/// | `HOST`                        | `0.0.0.0`               |
/// | `PORT`                        | `3000`                  |
/// | `CORS_ORIGINS`                | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
/// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                    |
/// | `DAY_BOUNDARY_OFFSET_MINUTES` | `0`                     |
/// | `JWT_SECRET`                  | required                |
/// | `JWT_ACCESS_EXPIRY_MINS`      | `15`                    |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Grace period for the profile sync task once the server has stopped.
    pub shutdown_timeout_secs: u64,
    /// Where one "day" ends for streaks, the daily points window and goal spans.
    pub calendar: Calendar,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let origins =
            std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into());
        let offset_minutes: i32 = parse_var("DAY_BOUNDARY_OFFSET_MINUTES", "0")?;

        Ok(Self {
            host: parse_var("HOST", "0.0.0.0")?,
            port: parse_var("PORT", "3000")?,
            cors_origins: split_origins(&origins),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            shutdown_timeout_secs: parse_var("SHUTDOWN_TIMEOUT_SECS", "30")?,
            calendar: Calendar::from_offset_minutes(offset_minutes)?,
            jwt: JwtConfig::from_env()?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

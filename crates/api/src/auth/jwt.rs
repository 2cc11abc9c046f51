//! HS256 access tokens.
//!
//! Tokens carry the user id in `sub`. The account service that issues them
//! shares `JWT_SECRET` with this API; [`JwtConfig::issue`] exists so tools
//! and tests can mint compatible tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pulsefit_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ConfigError;

/// Lifetime of minted tokens unless `JWT_ACCESS_EXPIRY_MINS` says otherwise.
const DEFAULT_TTL_MINS: i64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user's id.
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS` (default 15).
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Err(_) => DEFAULT_TTL_MINS,
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY_MINS",
                value: raw,
            })?,
        };

        Ok(Self {
            secret,
            access_token_expiry_mins,
        })
    }

    /// Sign a token for `user_id` valid for the configured lifetime.
    pub fn issue(&self, user_id: DbId) -> Result<String, JwtError> {
        let issued_at = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::minutes(self.access_token_expiry_mins)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(&claims)
    }

    /// Check signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        jsonwebtoken::decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let key = EncodingKey::from_secret(self.secret.as_bytes());
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &key)
    }
}

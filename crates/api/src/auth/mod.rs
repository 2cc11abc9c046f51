//! Authentication primitives.
//!
//! Tokens are issued by the account service; this API only validates them.
//! [`jwt::JwtConfig::issue`] mints tokens for tooling and tests.

pub mod jwt;

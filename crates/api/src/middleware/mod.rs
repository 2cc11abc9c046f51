//! Request guards.
//!
//! [`auth::AuthUser`] authenticates the caller from its Bearer token;
//! [`ownership::ensure_owner`] restricts a resource to the user it belongs to.

pub mod auth;
pub mod ownership;

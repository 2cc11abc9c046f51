//! HTTP surface of pulsefit.
//!
//! The binary in `main.rs` only wires configuration, the pool and the event
//! bus together; everything routable lives here so the integration tests can
//! build the same router.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod path;
pub mod progression;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

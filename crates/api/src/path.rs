//! Identifier parsing for path segments.
//!
//! Handlers take ids as `Path<String>` and parse them here so that a
//! malformed id yields a JSON `INVALID_ID` error instead of the framework's
//! plain-text rejection.

use pulsefit_core::error::{validate_id, CoreError};
use pulsefit_core::types::DbId;

/// Parse a positive database id from a raw path segment.
pub fn parse_id(raw: &str, entity: &str) -> Result<DbId, CoreError> {
    let id: DbId = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidId(format!("Invalid {entity} id: '{raw}'")))?;
    validate_id(id, entity)
}

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Validate a client-supplied identifier.
///
/// BIGSERIAL ids start at 1, so zero and negative values can never name a
/// row and are rejected before touching the database.
pub fn validate_id(id: DbId, label: &str) -> Result<DbId, CoreError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(CoreError::InvalidId(format!("{label} id must be positive, got {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_id_passes() {
        assert_eq!(validate_id(7, "Goal").unwrap(), 7);
    }

    #[test]
    fn non_positive_id_fails() {
        assert!(matches!(validate_id(0, "Goal"), Err(CoreError::InvalidId(_))));
        assert!(matches!(validate_id(-3, "User"), Err(CoreError::InvalidId(_))));
    }
}

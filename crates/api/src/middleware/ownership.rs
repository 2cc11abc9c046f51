//! Per-user ownership checks.
//!
//! There are no roles. Every streak, ledger, goal, workout and log belongs
//! to one user, and only a token for that user may touch it.

use pulsefit_core::error::CoreError;
use pulsefit_core::types::DbId;

use super::auth::AuthUser;

/// 403 unless the caller is `owner_id`.
pub fn ensure_owner(user: &AuthUser, owner_id: DbId) -> Result<(), CoreError> {
    if user.user_id != owner_id {
        return Err(CoreError::Forbidden(
            "You do not have access to this resource".into(),
        ));
    }
    Ok(())
}

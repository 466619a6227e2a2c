//! User registration rules.

use crate::error::{EngineError, EngineResult};
use crate::models::User;

/// Validates a user about to be created or updated.
///
/// Usernames are compared ignoring case. An existing user with the same id is
/// the record being updated and may keep its own username.
pub fn validate_user(candidate: &User, existing: &[User]) -> EngineResult<()> {
    let username = candidate.username.trim();
    if username.is_empty() {
        return Err(EngineError::InvalidUser {
            field: "username".to_string(),
            message: "username is required".to_string(),
        });
    }

    let wanted = username.to_lowercase();
    let taken = existing
        .iter()
        .any(|u| u.id != candidate.id && u.username.trim().to_lowercase() == wanted);
    if taken {
        return Err(EngineError::DuplicateUsername {
            username: username.to_string(),
        });
    }

    Ok(())
}

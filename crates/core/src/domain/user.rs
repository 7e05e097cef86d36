// User Domain Model (Phase 1)

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};

/// User ID (UUID v4)
pub type UserId = String;

/// Placeholder username rendered for users that no longer exist
pub const DELETED_USER: &str = "DELETED_USER";

const USERNAME_MAX_LEN: usize = 32;
const PASSWORD_MIN_LEN: usize = 8;

/// User Entity
///
/// `password_hash` is the Argon2id PHC string, never the raw password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl User {
    /// Create a new User
    ///
    /// # Arguments
    ///
    /// * `id` - Unique user ID (injected, not generated)
    /// * `username` - Already validated via [`validate_username`]
    /// * `password_hash` - Argon2id hash (hashing happens at the service layer)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at,
            updated_at: created_at,
        }
    }
}

/// Validate a username: non-empty, at most 32 chars, `[A-Za-z0-9_]` only.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(
            "username must not be empty".to_string(),
        ));
    }
    if username.len() > USERNAME_MAX_LEN {
        return Err(DomainError::InvalidUsername(format!(
            "username exceeds {} characters",
            USERNAME_MAX_LEN
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DomainError::InvalidUsername(
            "username may only contain letters, digits and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Validate a raw password before hashing: at least 8 chars.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(DomainError::InvalidPassword(format!(
            "password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }
    Ok(())
}

// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the error maps to a 4001 NOT_FOUND at the RPC boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// True when a client retry could plausibly succeed (lost CAS race).
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }

    pub fn user_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("user {} not found", id))
    }

    pub fn item_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("item {} not found", id))
    }

    pub fn post_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("post {} not found", id))
    }

    pub fn comment_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("comment {} not found", id))
    }

    pub fn session_invalid() -> Self {
        AppError::Unauthenticated("invalid or expired session".to_string())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// From implementations for infra crates (to avoid circular dependency)
impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Database(err)
    }
}

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError variants (UNIQUE violations become Conflict)

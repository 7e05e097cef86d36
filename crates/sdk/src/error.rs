//! SDK Error Types

use thiserror::Error;

/// Error codes returned by the daemon.
pub mod code {
    pub const VALIDATION: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const THROTTLED: i32 = 4003;
    pub const UNAUTHENTICATED: i32 = 4004;
    pub const FORBIDDEN: i32 = 4005;
    pub const INTERNAL: i32 = 5000;
    pub const DB_ERROR: i32 = 5001;
    pub const SYSTEM_ERROR: i32 = 5002;
}

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i32, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl SdkError {
    fn has_code(&self, expected: i32) -> bool {
        matches!(self, SdkError::Rpc { code, .. } if *code == expected)
    }

    /// The session token was missing, invalid or expired.
    pub fn is_unauthenticated(&self) -> bool {
        self.has_code(code::UNAUTHENTICATED)
    }

    /// The referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.has_code(code::NOT_FOUND)
    }

    /// The operation lost to a concurrent writer or violated uniqueness.
    /// Claim operations report this when retries are exhausted; retrying
    /// the call is safe.
    pub fn is_conflict(&self) -> bool {
        self.has_code(code::CONFLICT)
    }

    /// The daemon's rate limit kicked in; back off and retry.
    pub fn is_throttled(&self) -> bool {
        self.has_code(code::THROTTLED)
    }
}

impl From<jsonrpsee::core::ClientError> for SdkError {
    fn from(e: jsonrpsee::core::ClientError) -> Self {
        match e {
            jsonrpsee::core::ClientError::Call(call_err) => SdkError::Rpc {
                code: call_err.code(),
                message: call_err.message().to_string(),
            },
            jsonrpsee::core::ClientError::Transport(e) => {
                SdkError::Transport(format!("Transport error: {}", e))
            }
            jsonrpsee::core::ClientError::RestartNeeded(_) => {
                SdkError::Connection("Connection restart needed".to_string())
            }
            jsonrpsee::core::ClientError::ParseError(e) => {
                SdkError::Other(format!("Parse error: {}", e))
            }
            _ => SdkError::Other(e.to_string()),
        }
    }
}

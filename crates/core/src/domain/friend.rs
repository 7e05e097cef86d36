// Friend Domain Model (Phase 3)

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};
use crate::domain::user::UserId;

/// Friend request ID (UUID v4)
pub type RequestId = String;

/// Friend request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "ACCEPTED" => Ok(RequestStatus::Accepted),
            "REJECTED" => Ok(RequestStatus::Rejected),
            other => Err(DomainError::Internal(format!(
                "unknown request status: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Friend request entity. Resolved rows (accepted/rejected) are kept for
/// history; only the PENDING row blocks a duplicate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: RequestId,
    pub from_user: UserId,
    pub to_user: UserId,
    pub status: RequestStatus,
    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl FriendRequest {
    pub fn new(
        id: impl Into<String>,
        from_user: impl Into<String>,
        to_user: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            from_user: from_user.into(),
            to_user: to_user.into(),
            status: RequestStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    /// Transition to Accepted; only valid from Pending
    pub fn accept(&mut self, now_millis: i64) -> Result<()> {
        if self.status != RequestStatus::Pending {
            return Err(DomainError::InvalidRequestTransition {
                from: self.status.to_string(),
                to: "ACCEPTED".to_string(),
            });
        }
        self.status = RequestStatus::Accepted;
        self.updated_at = now_millis;
        Ok(())
    }

    /// Transition to Rejected; only valid from Pending
    pub fn reject(&mut self, now_millis: i64) -> Result<()> {
        if self.status != RequestStatus::Pending {
            return Err(DomainError::InvalidRequestTransition {
                from: self.status.to_string(),
                to: "REJECTED".to_string(),
            });
        }
        self.status = RequestStatus::Rejected;
        self.updated_at = now_millis;
        Ok(())
    }
}

/// Established friendship (stored once, queried in both directions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub user_a: UserId,
    pub user_b: UserId,
    pub created_at: i64,
}

impl Friendship {
    pub fn new(user_a: impl Into<String>, user_b: impl Into<String>, created_at: i64) -> Self {
        Self {
            user_a: user_a.into(),
            user_b: user_b.into(),
            created_at,
        }
    }

    pub fn involves(&self, user: &str) -> bool {
        self.user_a == user || self.user_b == user
    }

    /// The counterpart of `user`, if `user` is part of this friendship
    pub fn other(&self, user: &str) -> Option<&UserId> {
        if self.user_a == user {
            Some(&self.user_b)
        } else if self.user_b == user {
            Some(&self.user_a)
        } else {
            None
        }
    }
}

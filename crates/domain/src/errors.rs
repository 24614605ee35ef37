//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Slated
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlatedError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scheduling conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Insufficient scope: {0}")]
    InsufficientScope(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlatedError {
    /// Stable label suitable for metrics and structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Auth(_) => "auth",
            Self::InsufficientScope(_) => "insufficient_scope",
            Self::Dispatch(_) => "dispatch",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether a caller retry can plausibly succeed without an elevated
    /// grant or a fresh credential.
    ///
    /// Conflicts clear when the caller picks a different time; dispatch
    /// failures are transport-transient. Auth and scope failures require
    /// re-issuance or a broader grant and are never retried automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Dispatch(_))
    }
}

/// Result type alias for Slated operations
pub type Result<T> = std::result::Result<T, SlatedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(SlatedError::Validation("x".into()).label(), "validation");
        assert_eq!(SlatedError::InsufficientScope("x".into()).label(), "insufficient_scope");
    }

    #[test]
    fn auth_errors_are_not_retryable() {
        assert!(!SlatedError::Auth("expired".into()).is_retryable());
        assert!(!SlatedError::InsufficientScope("email".into()).is_retryable());
        assert!(SlatedError::Conflict("same instant".into()).is_retryable());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(SlatedError::Conflict("busy".into())).unwrap();
        assert_eq!(json["type"], "Conflict");
        assert_eq!(json["message"], "busy");
    }
}

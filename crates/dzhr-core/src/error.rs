//! Centralized error types for DZHR.

use thiserror::Error;

/// Main error type for DZHR operations.
#[derive(Error, Debug)]
pub enum DzhrError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Design system with this name already exists: {0}")]
    NameTaken(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Scrape failed: {0}")]
    Scrape(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Design tool error: {0}")]
    DesignTool(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for DZHR operations.
pub type DzhrResult<T> = Result<T, DzhrError>;

/// The class an error belongs to when surfaced to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected before any external call.
    Input,
    Conflict,
    NotFound,
    /// External service or internal failure.
    Upstream,
}

impl DzhrError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller, not a collaborator, is at fault.
    pub fn is_client_error(&self) -> bool {
        self.class() != ErrorClass::Upstream
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) | Self::InvalidDevice(_) | Self::InvalidUrl(_) => ErrorClass::Input,
            Self::NameTaken(_) => ErrorClass::Conflict,
            Self::NotFound(_) => ErrorClass::NotFound,
            _ => ErrorClass::Upstream,
        }
    }
}

impl From<dzhr_redis::RedisError> for DzhrError {
    fn from(e: dzhr_redis::RedisError) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(DzhrError::InvalidDevice("fridge".into()).class(), ErrorClass::Input);
        assert_eq!(DzhrError::NameTaken("X".into()).class(), ErrorClass::Conflict);
        assert_eq!(DzhrError::NotFound("x".into()).class(), ErrorClass::NotFound);
        assert_eq!(DzhrError::Timeout(std::time::Duration::from_secs(1)).class(), ErrorClass::Upstream);
        assert!(DzhrError::validation("x").is_client_error());
        assert!(!DzhrError::Scrape("x".into()).is_client_error());
    }
}

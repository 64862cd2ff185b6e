//! Error types for the Jellyfin MCP server

use thiserror::Error;

/// Result type alias for Jellyfin MCP operations
pub type Result<T> = std::result::Result<T, JellyfinError>;

/// Main error type for the Jellyfin MCP server
#[derive(Error, Debug)]
pub enum JellyfinError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jellyfin API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JellyfinError {
    /// Check if the error came from the backend rather than from the caller
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            JellyfinError::Http(_) | JellyfinError::Api { .. } | JellyfinError::Serialization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_backend() {
        let api = JellyfinError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert!(api.is_backend());
        assert!(!JellyfinError::Config("x".into()).is_backend());
        assert!(!JellyfinError::InvalidInput("x".into()).is_backend());
        assert!(!JellyfinError::NotFound("x".into()).is_backend());
    }

    #[test]
    fn test_api_error_display() {
        let err = JellyfinError::Api {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert_eq!(err.to_string(), "Jellyfin API error 401: Unauthorized");
    }
}

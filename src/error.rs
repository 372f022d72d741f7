//! Error types for the mcp-base framework
//!
//! Structured error definitions via thiserror; anyhow errors are accepted
//! at the boundary and folded into the catch-all variant. The variant tags
//! double as the failure categories an [`ErrorChain`](crate::ErrorChain)
//! matches on.

use thiserror::Error;

/// Main error type for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Transport I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed protocol interaction
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A tool rejected its arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// A tool failed during execution
    #[error("Tool error: {0}")]
    Tool(String),

    /// Startup hook failed; fatal, the process must not reach serving
    #[error("Startup failed: {0}")]
    Startup(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Convert anyhow::Error to ServerError
impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::Validation("query must not be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: query must not be empty");

        let err = ServerError::Startup("schema init failed".to_string());
        assert_eq!(err.to_string(), "Startup failed: schema init failed");
    }

    #[test]
    fn test_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ServerError = serde_err.into();
        assert!(matches!(err, ServerError::Serialization(_)));

        let err: ServerError = anyhow::anyhow!("opaque failure").into();
        assert!(matches!(err, ServerError::Other(_)));
        assert_eq!(err.to_string(), "opaque failure");
    }
}

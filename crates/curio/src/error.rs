//! Error types for Curio

use thiserror::Error;

use crate::completion::CompletionError;

/// Main error type for Curio operations
#[derive(Error, Debug)]
pub enum CurioError {
    /// Configuration errors (invalid addresses, unreadable config files, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion service errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Curio operations
pub type Result<T> = std::result::Result<T, CurioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_converts() {
        let err: CurioError = CompletionError::ApiError("API returned 500".to_string()).into();
        assert!(matches!(err, CurioError::Completion(_)));
        assert_eq!(err.to_string(), "Completion error: API error: API returned 500");
    }

    #[test]
    fn test_config_error_display() {
        let err = CurioError::Config("Invalid listen address".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid listen address");
    }
}

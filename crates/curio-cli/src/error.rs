use std::fmt;

use thiserror::Error;

#[derive(Debug)]
pub struct CliError(pub String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CliError {}

impl From<String> for CliError {
    fn from(s: String) -> Self {
        CliError(s)
    }
}

impl From<&str> for CliError {
    fn from(s: &str) -> Self {
        CliError(s.to_string())
    }
}

impl From<curio::CurioError> for CliError {
    fn from(e: curio::CurioError) -> Self {
        CliError(e.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        CliError(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError(format!("JSON error: {e}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError(format!("IO error: {e}"))
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Errors from talking to a Curio server
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be built
    #[error("Client setup error: {0}")]
    Setup(String),

    /// Any failure of a chat turn; the cause is logged, never shown
    #[error("Failed to process message")]
    ProcessingFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_failed_message_is_fixed() {
        assert_eq!(
            ClientError::ProcessingFailed.to_string(),
            "Failed to process message"
        );
    }

    #[test]
    fn test_client_error_converts_to_cli_error() {
        let err: CliError = ClientError::ProcessingFailed.into();
        assert_eq!(err.to_string(), "Failed to process message");
    }
}

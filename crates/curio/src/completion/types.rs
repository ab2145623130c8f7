//! Completion request and error types

/// A single prompt with its sampling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Prompt sent as the only user message
    pub prompt: String,
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_tokens,
        }
    }
}

/// Completion-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

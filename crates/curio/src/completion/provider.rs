//! Completion provider trait
//!
//! Abstracts the text-completion backend used by the turn pipeline.

use async_trait::async_trait;

use crate::completion::types::{CompletionError, CompletionRequest};

/// Trait for completion backends (remote API, scripted test doubles)
///
/// A provider takes one prompt plus sampling parameters and returns one
/// completion text. Implementations must not retry on their own; a failed
/// call is reported to the caller as-is.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produce a single completion for the request
    ///
    /// Returns the raw (untrimmed) completion text. A response without any
    /// content yields an empty string rather than an error.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

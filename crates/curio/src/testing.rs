//! Test utilities for curio - scripted completion provider
//!
//! `MockCompletion` replays a queue of canned completions (or failures) in
//! order and records every request it receives, so pipeline tests can
//! assert on prompts and sampling parameters without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};

#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Failure(String),
}

/// Completion provider that answers from a fixed script
#[derive(Debug, Clone, Default)]
pub struct MockCompletion {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(Scripted::Text(content.into()));
        self
    }

    /// Queue an upstream failure
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Failure(message.into()));
        self
    }

    /// Requests received so far, in call order
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().expect("mock script poisoned").len()
    }

    fn push(&self, entry: Scripted) {
        self.script
            .lock()
            .expect("mock script poisoned")
            .push_back(entry);
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request.clone());

        let next = self.script.lock().expect("mock script poisoned").pop_front();
        match next {
            Some(Scripted::Text(content)) => Ok(content),
            Some(Scripted::Failure(message)) => Err(CompletionError::ApiError(message)),
            None => Err(CompletionError::ApiError(
                "mock script exhausted".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_replays_script_in_order() {
        let mock = MockCompletion::new()
            .with_response("YES")
            .with_failure("boom");
        let request = CompletionRequest::new("prompt", 0.0, 10);

        assert_eq!(mock.complete(&request).await.unwrap(), "YES");
        assert!(mock.complete(&request).await.is_err());
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.remaining(), 0);
    }

    #[tokio::test]
    async fn mock_fails_when_exhausted() {
        let mock = MockCompletion::new();
        let err = mock
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("exhausted"));
    }

    #[tokio::test]
    async fn mock_clones_share_state() {
        let mock = MockCompletion::new().with_response("one");
        let handle = mock.clone();

        mock.complete(&CompletionRequest::new("p", 0.0, 1))
            .await
            .unwrap();

        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.calls()[0].prompt, "p");
    }
}

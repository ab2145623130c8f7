//! Rescue intent gate

use std::sync::Arc;
use tracing::debug;

use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};
use crate::pipeline::prompts::intent_prompt;

const TEMPERATURE: f32 = 0.0;
const MAX_TOKENS: u32 = 10;

/// Decides whether a message describes a stray-animal rescue situation
#[derive(Clone)]
pub struct IntentClassifier {
    provider: Arc<dyn CompletionProvider>,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// True iff the completion is exactly "YES" after trimming and uppercasing
    ///
    /// Only the latest message is consulted. Completion failures propagate.
    pub async fn classify(&self, message: &str) -> Result<bool, CompletionError> {
        let request = CompletionRequest::new(intent_prompt(message), TEMPERATURE, MAX_TOKENS);
        let response = self.provider.complete(&request).await?;
        debug!("Intent classification response: {:?}", response);
        Ok(response.trim().to_uppercase() == "YES")
    }
}

//! Conversational reply generation

use std::sync::Arc;
use tracing::debug;

use crate::chat::Message;
use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};
use crate::pipeline::history::render_recent;
use crate::pipeline::prompts::response_prompt;
use crate::rescue::ExtractedFields;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 400;

/// Reply used when the model returns nothing
pub const FALLBACK_REPLY: &str = "I understand you need help with an animal situation. Could you provide more details about what you're seeing?";

/// Writes Curio's reply from the message, extracted fields and recent history
#[derive(Clone)]
pub struct ResponseSynthesizer {
    provider: Arc<dyn CompletionProvider>,
    history_window: usize,
}

impl ResponseSynthesizer {
    pub fn new(provider: Arc<dyn CompletionProvider>, history_window: usize) -> Self {
        Self {
            provider,
            history_window,
        }
    }

    /// Produce the reply text; never empty
    pub async fn synthesize(
        &self,
        message: &str,
        fields: &ExtractedFields,
        history: &[Message],
    ) -> Result<String, CompletionError> {
        let conversation = render_recent(history, self.history_window);
        let request = CompletionRequest::new(
            response_prompt(message, fields, &conversation),
            TEMPERATURE,
            MAX_TOKENS,
        );

        let response = self.provider.complete(&request).await?;
        let reply = response.trim();
        if reply.is_empty() {
            debug!("Empty synthesis completion, using fallback reply");
            return Ok(FALLBACK_REPLY.to_string());
        }
        Ok(reply.to_string())
    }
}

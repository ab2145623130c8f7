//! Structured field extraction

use std::sync::Arc;
use tracing::{debug, warn};

use crate::chat::Message;
use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};
use crate::pipeline::history::render_recent;
use crate::pipeline::prompts::extraction_prompt;
use crate::rescue::ExtractionOutcome;

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;

/// Pulls animal type, issue, location, urgency and first aid out of a turn
#[derive(Clone)]
pub struct FieldExtractor {
    provider: Arc<dyn CompletionProvider>,
    history_window: usize,
}

impl FieldExtractor {
    pub fn new(provider: Arc<dyn CompletionProvider>, history_window: usize) -> Self {
        Self {
            provider,
            history_window,
        }
    }

    /// Extract fields from the latest message plus recent history
    ///
    /// Output that is not valid JSON comes back as `Malformed` and is
    /// logged here; only completion transport failures are returned as errors.
    pub async fn extract(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<ExtractionOutcome, CompletionError> {
        let conversation = render_recent(history, self.history_window);
        let request = CompletionRequest::new(
            extraction_prompt(message, &conversation),
            TEMPERATURE,
            MAX_TOKENS,
        );

        let response = self.provider.complete(&request).await?;
        debug!("Extraction response: {}", response);

        let outcome = ExtractionOutcome::parse(&response);
        if let ExtractionOutcome::Malformed(raw) = &outcome {
            warn!(
                "Error parsing extracted data, continuing without fields: {:?}",
                raw
            );
        }
        Ok(outcome)
    }
}

//! Turn orchestrator
//!
//! One user message runs through a chain of typed stages:
//!
//! ```text
//! Turn --check_gate--> Gate::Rejected ------------------------------> ChatReply
//!                  \-> Gate::Accepted --extract--> ExtractedTurn --respond--> RespondedTurn --> ChatReply
//! ```
//!
//! Each stage consumes the previous one, so a rejected turn cannot reach the
//! extractor or synthesizer. The orchestrator holds no per-turn state.

use std::sync::Arc;
use tracing::{debug, info};

use crate::chat::{ChatReply, Message};
use crate::completion::{CompletionError, CompletionProvider};
use crate::config::PipelineConfig;
use crate::pipeline::classifier::IntentClassifier;
use crate::pipeline::extractor::FieldExtractor;
use crate::pipeline::synthesizer::ResponseSynthesizer;
use crate::rescue::{ExtractedFields, ExtractionOutcome};

/// Reply for messages that are not about a stray animal
pub const REDIRECT_MESSAGE: &str = "I'm specifically designed to help with stray animal rescue situations. Could you please describe a stray animal that needs help? Include details about the animal type, its condition, and where you found it.";

/// A turn that has not been gate-checked yet
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    message: &'a str,
    history: &'a [Message],
}

/// Outcome of the rescue-intent gate
#[derive(Debug)]
pub enum Gate<'a> {
    Rejected(RejectedTurn),
    Accepted(AcceptedTurn<'a>),
}

/// A turn turned away by the gate
#[derive(Debug)]
pub struct RejectedTurn;

/// A turn that passed the gate and is ready for extraction
#[derive(Debug)]
pub struct AcceptedTurn<'a> {
    turn: Turn<'a>,
}

/// A turn with its extraction outcome
#[derive(Debug)]
pub struct ExtractedTurn<'a> {
    turn: Turn<'a>,
    outcome: ExtractionOutcome,
}

/// A turn with its reply text, awaiting the completeness decision
#[derive(Debug)]
pub struct RespondedTurn {
    content: String,
    fields: ExtractedFields,
}

impl<'a> Turn<'a> {
    pub fn new(message: &'a str, history: &'a [Message]) -> Self {
        Self { message, history }
    }

    pub async fn check_gate(
        self,
        classifier: &IntentClassifier,
    ) -> Result<Gate<'a>, CompletionError> {
        if classifier.classify(self.message).await? {
            Ok(Gate::Accepted(AcceptedTurn { turn: self }))
        } else {
            Ok(Gate::Rejected(RejectedTurn))
        }
    }
}

impl RejectedTurn {
    pub fn finish(self) -> ChatReply {
        ChatReply::text(REDIRECT_MESSAGE)
    }
}

impl<'a> AcceptedTurn<'a> {
    pub async fn extract(
        self,
        extractor: &FieldExtractor,
    ) -> Result<ExtractedTurn<'a>, CompletionError> {
        let outcome = extractor
            .extract(self.turn.message, self.turn.history)
            .await?;
        Ok(ExtractedTurn {
            turn: self.turn,
            outcome,
        })
    }
}

impl ExtractedTurn<'_> {
    pub fn outcome(&self) -> &ExtractionOutcome {
        &self.outcome
    }

    /// Generate the reply from whatever fields were extracted, even degenerate ones
    pub async fn respond(
        self,
        synthesizer: &ResponseSynthesizer,
    ) -> Result<RespondedTurn, CompletionError> {
        let fields = self.outcome.fields();
        let content = synthesizer
            .synthesize(self.turn.message, &fields, self.turn.history)
            .await?;
        Ok(RespondedTurn { content, fields })
    }
}

impl RespondedTurn {
    /// Attach the record only when every required field is present
    pub fn finish(self) -> ChatReply {
        let rescue_data = self.fields.to_record();
        match &rescue_data {
            Some(record) => info!(
                animal_type = %record.animal_type,
                urgency = %record.urgency,
                "Rescue report complete"
            ),
            None => debug!(
                missing = ?self.fields.missing_fields(),
                "Rescue report incomplete, omitting record"
            ),
        }

        ChatReply {
            content: self.content,
            rescue_data,
        }
    }
}

/// Single entry point for processing a user message
#[derive(Clone)]
pub struct TurnOrchestrator {
    classifier: IntentClassifier,
    extractor: FieldExtractor,
    synthesizer: ResponseSynthesizer,
}

impl TurnOrchestrator {
    /// Build the pipeline over one completion provider
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &PipelineConfig) -> Self {
        Self {
            classifier: IntentClassifier::new(provider.clone()),
            extractor: FieldExtractor::new(provider.clone(), config.extraction_history),
            synthesizer: ResponseSynthesizer::new(provider, config.response_history),
        }
    }

    /// Run one turn: gate, extract, respond, then decide completeness
    ///
    /// Calls run strictly in sequence and nothing is retried; the first
    /// completion failure aborts the turn.
    pub async fn process(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<ChatReply, CompletionError> {
        match Turn::new(message, history)
            .check_gate(&self.classifier)
            .await?
        {
            Gate::Rejected(rejected) => {
                debug!("Message is not a rescue situation, redirecting");
                Ok(rejected.finish())
            }
            Gate::Accepted(accepted) => {
                let extracted = accepted.extract(&self.extractor).await?;
                let responded = extracted.respond(&self.synthesizer).await?;
                Ok(responded.finish())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    fn orchestrator(mock: &MockCompletion) -> TurnOrchestrator {
        TurnOrchestrator::new(Arc::new(mock.clone()), &PipelineConfig::default())
    }

    #[tokio::test]
    async fn test_rejected_turn_skips_later_stages() {
        let mock = MockCompletion::new().with_response("NO");

        let reply = orchestrator(&mock)
            .process("What should I feed my pet cat?", &[])
            .await
            .unwrap();

        assert_eq!(reply.content, REDIRECT_MESSAGE);
        assert!(reply.rescue_data.is_none());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_extraction_still_replies() {
        let mock = MockCompletion::new()
            .with_response("YES")
            .with_response("not json")
            .with_response("Could you tell me more about the animal?");

        let reply = orchestrator(&mock)
            .process("I see a dog", &[])
            .await
            .unwrap();

        assert_eq!(reply.content, "Could you tell me more about the animal?");
        assert!(reply.rescue_data.is_none());
        assert_eq!(mock.call_count(), 3);

        // Degenerate fields reach the synthesizer as "not specified"
        let calls = mock.calls();
        assert!(calls[2].prompt.contains("- Animal type: not specified"));
    }

    #[tokio::test]
    async fn test_stage_chain_can_be_driven_manually() {
        let mock = MockCompletion::new()
            .with_response("YES")
            .with_response(r#"{"animalType":"cat"}"#);
        let provider: Arc<dyn CompletionProvider> = Arc::new(mock.clone());
        let classifier = IntentClassifier::new(provider.clone());
        let extractor = FieldExtractor::new(provider, 5);

        let Gate::Accepted(accepted) = Turn::new("Found a cat", &[])
            .check_gate(&classifier)
            .await
            .unwrap()
        else {
            panic!("expected gate to accept");
        };
        let extracted = accepted.extract(&extractor).await.unwrap();

        assert_eq!(
            extracted.outcome().fields().animal_type.as_deref(),
            Some("cat")
        );
    }
}

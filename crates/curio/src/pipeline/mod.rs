//! Conversation turn pipeline
//!
//! Intent gate, field extraction and response synthesis, each backed by a
//! completion call, plus the orchestrator that chains them for one turn.

pub mod classifier;
pub mod extractor;
pub mod history;
pub mod orchestrator;
pub mod prompts;
pub mod synthesizer;

pub use classifier::IntentClassifier;
pub use extractor::FieldExtractor;
pub use orchestrator::{REDIRECT_MESSAGE, TurnOrchestrator};
pub use synthesizer::{FALLBACK_REPLY, ResponseSynthesizer};

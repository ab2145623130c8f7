//! Rescue records extracted from stray-animal conversations

pub mod types;

pub use types::{ExtractedFields, ExtractionOutcome, RescueRecord, Urgency};

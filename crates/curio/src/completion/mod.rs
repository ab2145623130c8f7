//! Completion client for the external text-generation service
//!
//! Every pipeline stage talks to the LLM through the [`CompletionProvider`]
//! trait, so the remote HTTP client can be swapped for a scripted mock in tests.

pub mod provider;
pub mod remote;
pub mod types;

pub use provider::CompletionProvider;
pub use remote::RemoteCompletion;
pub use types::{CompletionError, CompletionRequest};

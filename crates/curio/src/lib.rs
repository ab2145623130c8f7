//! Curio - stray-animal rescue chat assistant
//!
//! This crate provides an HTTP server that gates each chat message for
//! rescue intent, extracts a structured rescue record and writes a reply,
//! delegating all three steps to an external LLM completion API.

pub mod chat;
pub mod completion;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rescue;
pub mod server;
pub mod testing;

pub use error::CurioError;

//! Chat message types shared by the server and its clients
//!
//! These are the JSON shapes that cross the `/api/chat` boundary.

pub mod types;

pub use types::{ChatReply, ChatRequest, ErrorBody, Message, Role};

//! Client-side chat session
//!
//! A [`ChatSession`] is an immutable snapshot. [`ChatSession::submit`] and
//! [`ChatSession::resolve`] each return the next snapshot; nothing is mutated
//! in place.

use curio::chat::{ChatReply, Message};
use curio::rescue::RescueRecord;

use crate::error::ClientError;

/// First assistant message of every session
pub const GREETING: &str = "Hello! I'm Curio, your stray animal rescue assistant. 🐾 I'm here to help you with any stray animal situation you encounter. Please tell me what's happening - describe the animal, its condition, and where you found it.";

/// Assistant message appended when a turn fails
pub const APOLOGY: &str = "I'm sorry, I'm having trouble processing your message right now. Please try again or contact emergency services if this is urgent.";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<Message>,
    rescue_data: Option<RescueRecord>,
    pending: bool,
}

/// A submitted turn waiting to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub message: String,
    /// Conversation as it stood before `message` was appended
    pub history: Vec<Message>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
            rescue_data: None,
            pending: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn rescue_data(&self) -> Option<&RescueRecord> {
        self.rescue_data.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append a user message and start a turn
    ///
    /// Returns `None` for blank input or while another turn is in flight.
    pub fn submit(&self, input: &str) -> Option<(ChatSession, PendingTurn)> {
        if input.trim().is_empty() || self.pending {
            return None;
        }

        let turn = PendingTurn {
            message: input.to_string(),
            history: self.messages.clone(),
        };

        let mut messages = self.messages.clone();
        messages.push(Message::user(input));

        let next = ChatSession {
            messages,
            rescue_data: self.rescue_data.clone(),
            pending: true,
        };

        Some((next, turn))
    }

    /// Fold the outcome of the in-flight turn into a new snapshot
    pub fn resolve(&self, outcome: Result<ChatReply, ClientError>) -> ChatSession {
        let mut messages = self.messages.clone();
        let mut rescue_data = self.rescue_data.clone();

        match outcome {
            Ok(reply) => {
                messages.push(Message::assistant(reply.content));
                if let Some(record) = reply.rescue_data {
                    rescue_data = Some(record);
                }
            }
            Err(e) => {
                tracing::warn!("Turn failed: {e}");
                messages.push(Message::assistant(APOLOGY));
            }
        }

        ChatSession {
            messages,
            rescue_data,
            pending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio::chat::Role;
    use curio::rescue::Urgency;

    fn record(animal: &str) -> RescueRecord {
        RescueRecord {
            animal_type: animal.to_string(),
            issue: "injured".to_string(),
            location: "park".to_string(),
            urgency: Urgency::High,
            first_aid: vec!["Keep the animal calm".to_string()],
            report_generated: true,
        }
    }

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = ChatSession::new();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(session.rescue_data().is_none());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_submit_rejects_blank_input() {
        let session = ChatSession::new();

        assert!(session.submit("").is_none());
        assert!(session.submit("   \n\t").is_none());
    }

    #[test]
    fn test_submit_appends_user_message_and_snapshots_history() {
        let session = ChatSession::new();

        let (next, turn) = session.submit("I found an injured dog").unwrap();

        assert!(next.is_pending());
        assert_eq!(next.messages().len(), 2);
        assert_eq!(next.messages()[1].role, Role::User);
        assert_eq!(next.messages()[1].content, "I found an injured dog");
        assert_eq!(turn.message, "I found an injured dog");
        // History excludes the message being sent
        assert_eq!(turn.history, session.messages());
        // Original snapshot untouched
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_submit_rejected_while_pending() {
        let (pending, _) = ChatSession::new().submit("first").unwrap();

        assert!(pending.submit("second").is_none());
    }

    #[test]
    fn test_resolve_success_appends_reply_and_stores_record() {
        let (pending, _) = ChatSession::new().submit("injured dog in the park").unwrap();
        let reply = ChatReply {
            content: "Keep your distance.".to_string(),
            rescue_data: Some(record("dog")),
        };

        let done = pending.resolve(Ok(reply));

        assert!(!done.is_pending());
        assert_eq!(done.messages().len(), 3);
        assert_eq!(done.messages()[2].role, Role::Assistant);
        assert_eq!(done.messages()[2].content, "Keep your distance.");
        assert_eq!(done.rescue_data(), Some(&record("dog")));
    }

    #[test]
    fn test_resolve_without_record_keeps_previous_record() {
        let (pending, _) = ChatSession::new().submit("injured dog").unwrap();
        let first = pending.resolve(Ok(ChatReply {
            content: "ok".to_string(),
            rescue_data: Some(record("dog")),
        }));

        let (pending, _) = first.submit("thanks").unwrap();
        let second = pending.resolve(Ok(ChatReply::text("You're welcome")));

        assert_eq!(second.rescue_data(), Some(&record("dog")));
    }

    #[test]
    fn test_resolve_replaces_record() {
        let (pending, _) = ChatSession::new().submit("injured dog").unwrap();
        let first = pending.resolve(Ok(ChatReply {
            content: "ok".to_string(),
            rescue_data: Some(record("dog")),
        }));

        let (pending, _) = first.submit("also a cat").unwrap();
        let second = pending.resolve(Ok(ChatReply {
            content: "ok".to_string(),
            rescue_data: Some(record("cat")),
        }));

        assert_eq!(second.rescue_data().unwrap().animal_type, "cat");
    }

    #[test]
    fn test_resolve_failure_appends_apology() {
        let (pending, _) = ChatSession::new().submit("injured dog").unwrap();

        let done = pending.resolve(Err(ClientError::ProcessingFailed));

        assert!(!done.is_pending());
        assert_eq!(done.messages().last().unwrap().content, APOLOGY);
        assert!(done.rescue_data().is_none());
    }

    #[test]
    fn test_second_turn_history_includes_first_exchange() {
        let (pending, _) = ChatSession::new().submit("dog by the road").unwrap();
        let first = pending.resolve(Ok(ChatReply::text("Is it hurt?")));

        let (_, turn) = first.submit("yes, limping").unwrap();

        let contents: Vec<&str> = turn.history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![GREETING, "dog by the road", "Is it hurt?"]);
    }
}

//! Rendering of conversation history into prompt context

use crate::chat::Message;

/// Render the last `window` messages as `role: content` lines, oldest first
pub fn render_recent(history: &[Message], window: usize) -> String {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .map(|msg| format!("{}: {}", msg.role.as_str(), msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

//! Per-chat conversation history.
//!
//! Created at the start of one `chat()` and dropped when it returns. Only the
//! agent loop appends to it.

use campusdesk_core::message::{Message, Role};
use campusdesk_core::tool::ToolCall;

/// Append-only message history: one `System`, one `Human`, then alternating
/// `Ai` turns and the `ToolResult`s answering them.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// Start a conversation from a system prompt and the user's message.
    pub fn seed(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message::system(system_prompt),
                Message::human(user_message),
            ],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Text of the most recent `Ai` message.
    pub fn last_ai_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::Ai)
            .map(Message::content)
    }

    pub(crate) fn push_ai(&mut self, message: Message) {
        debug_assert_eq!(message.role(), Role::Ai);
        self.messages.push(message);
    }

    pub(crate) fn push_tool_result(&mut self, call: &ToolCall, output: String) {
        self.messages
            .push(Message::tool_result(&call.id, &call.name, output));
    }
}

//! Message domain types.
//!
//! These are the value objects that flow between the chat service, the agent
//! loop and the language model: the caller's text comes in as a `Human`
//! message, the model answers with `Ai` messages, and tool outputs are fed
//! back as `ToolResult` messages.

use serde::{Deserialize, Serialize};

use crate::tool::ToolCall;

/// Opaque identity of the person chatting.
///
/// Tool executors receive it as an explicit parameter; it is never rendered
/// into anything sent to the language model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Ai,
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// System instructions
    System { content: String },

    /// Text from the end user
    Human { content: String },

    /// Model output, optionally requesting tool calls
    Ai {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },

    /// Output of one tool call, answering the preceding `Ai` message
    ToolResult {
        call_id: String,
        tool_name: String,
        content: String,
    },
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    /// Create a model message without tool calls.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::Ai {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Create a model message requesting tool calls.
    pub fn ai_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Ai {
            content: content.into(),
            tool_calls,
        }
    }

    /// Create a tool result message.
    pub fn tool_result(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::ToolResult {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::System { .. } => Role::System,
            Self::Human { .. } => Role::Human,
            Self::Ai { .. } => Role::Ai,
            Self::ToolResult { .. } => Role::Tool,
        }
    }

    /// The text content.
    pub fn content(&self) -> &str {
        match self {
            Self::System { content }
            | Self::Human { content }
            | Self::Ai { content, .. }
            | Self::ToolResult { content, .. } => content,
        }
    }

    /// Tool calls requested by this message (empty unless `Ai`).
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Ai { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_human_message() {
        let msg = Message::human("Where is room 203?");
        assert_eq!(msg.role(), Role::Human);
        assert_eq!(msg.content(), "Where is room 203?");
        assert!(msg.tool_calls().is_empty());
    }

    #[test]
    fn ai_message_exposes_tool_calls() {
        let call = ToolCall {
            id: "call_1".into(),
            name: "get_menu".into(),
            arguments: serde_json::json!({"day": "monday"}),
        };
        let msg = Message::ai_with_tools("", vec![call]);
        assert_eq!(msg.role(), Role::Ai);
        assert_eq!(msg.tool_calls().len(), 1);
        assert_eq!(msg.tool_calls()[0].name, "get_menu");
    }

    #[test]
    fn message_serializes_with_role_tag() {
        let msg = Message::tool_result("call_1", "search_knowledge", "Room 203 is IT");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool_result");
        assert_eq!(json["call_id"], "call_1");
        assert_eq!(json["tool_name"], "search_knowledge");
    }

    #[test]
    fn user_id_display() {
        let user = UserId::new("u-42");
        assert_eq!(user.to_string(), "u-42");
        assert_eq!(user.as_str(), "u-42");
    }
}

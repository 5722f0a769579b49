//! Tool kinds: the closed set of capabilities the assistant can delegate to.
//!
//! The language model sees each kind as a named function with a JSON Schema.
//! Executors for these kinds live in `campusdesk-tools`.

use serde::{Deserialize, Serialize};

use crate::provider::ToolDefinition;

/// A request from the language model to execute a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// Every capability the assistant has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    SearchKnowledge,
    CreateTask,
    CreateAppointment,
    GetMenu,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::SearchKnowledge,
        ToolKind::CreateTask,
        ToolKind::CreateAppointment,
        ToolKind::GetMenu,
    ];

    /// The function name the model uses to call this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchKnowledge => "search_knowledge",
            ToolKind::CreateTask => "create_task",
            ToolKind::CreateAppointment => "create_appointment",
            ToolKind::GetMenu => "get_menu",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Description sent to the LLM.
    pub fn description(self) -> &'static str {
        match self {
            ToolKind::SearchKnowledge => {
                "Search the campus knowledge base (rooms, offices, services, policies). \
                 Use this for any factual question about the school."
            }
            ToolKind::CreateTask => {
                "Create a to-do task for the current user with a title, an optional \
                 description, a due date and a priority."
            }
            ToolKind::CreateAppointment => {
                "Book an appointment for the current user with a teacher at a given start \
                 time."
            }
            ToolKind::GetMenu => "Get the cafeteria menu for a day of the week.",
        }
    }

    /// Short phrase used when listing capabilities in the system prompt.
    pub fn capability(self) -> &'static str {
        match self {
            ToolKind::SearchKnowledge => "answer questions from the campus knowledge base",
            ToolKind::CreateTask => "create to-do tasks",
            ToolKind::CreateAppointment => "book appointments with teachers",
            ToolKind::GetMenu => "look up the cafeteria menu",
        }
    }

    /// JSON Schema describing this tool's parameters.
    pub fn parameters_schema(self) -> serde_json::Value {
        match self {
            ToolKind::SearchKnowledge => serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "What to look up in the knowledge base"
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
            ToolKind::CreateTask => serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Short title of the task"
                    },
                    "description": {
                        "type": "string",
                        "description": "Optional longer description"
                    },
                    "due_date": {
                        "type": "string",
                        "format": "date",
                        "description": "Due date as YYYY-MM-DD"
                    },
                    "priority": {
                        "type": "string",
                        "enum": ["Top", "Moderate", "Low"],
                        "description": "Task priority"
                    }
                },
                "required": ["title", "due_date", "priority"],
                "additionalProperties": false
            }),
            ToolKind::CreateAppointment => serde_json::json!({
                "type": "object",
                "properties": {
                    "teacher_id": {
                        "type": "string",
                        "description": "Identifier of the teacher to meet"
                    },
                    "start_time": {
                        "type": "string",
                        "format": "date-time",
                        "description": "Start time in RFC 3339 format, e.g. 2025-03-14T10:00:00Z"
                    },
                    "duration_minutes": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 480,
                        "default": 30,
                        "description": "Length of the appointment in minutes (default 30)"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Why the appointment is needed"
                    }
                },
                "required": ["teacher_id", "start_time", "reason"],
                "additionalProperties": false
            }),
            ToolKind::GetMenu => serde_json::json!({
                "type": "object",
                "properties": {
                    "day": {
                        "type": "string",
                        "description": "Day of the week, e.g. Monday"
                    }
                },
                "required": ["day"],
                "additionalProperties": false
            }),
        }
    }

    /// Convert this kind into a ToolDefinition for sending to the LLM.
    pub fn to_definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

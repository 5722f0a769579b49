//! Typed tool arguments.
//!
//! Every tool call is parsed into a [`ToolInvocation`] before anything is
//! executed. Parsing checks field names, field types, required fields and
//! value ranges; any mismatch is a [`ToolError::InvalidArguments`].

use campusdesk_core::error::ToolError;
use campusdesk_core::services::{NewAppointment, NewTask, Priority};
use campusdesk_core::tool::ToolKind;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Longest appointment that can be booked, in minutes.
pub const MAX_APPOINTMENT_MINUTES: u32 = 480;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchKnowledgeArgs {
    query: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateTaskArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
    due_date: NaiveDate,
    priority: Priority,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateAppointmentArgs {
    teacher_id: String,
    start_time: DateTime<Utc>,
    #[serde(default = "default_duration")]
    duration_minutes: u32,
    reason: String,
}

fn default_duration() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetMenuArgs {
    day: String,
}

/// A validated tool call, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    SearchKnowledge { query: String },
    CreateTask(NewTask),
    CreateAppointment(NewAppointment),
    GetMenu { day: Weekday },
}

impl ToolInvocation {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolInvocation::SearchKnowledge { .. } => ToolKind::SearchKnowledge,
            ToolInvocation::CreateTask(_) => ToolKind::CreateTask,
            ToolInvocation::CreateAppointment(_) => ToolKind::CreateAppointment,
            ToolInvocation::GetMenu { .. } => ToolKind::GetMenu,
        }
    }

    /// Validate raw model arguments for the given tool kind.
    pub fn parse(kind: ToolKind, arguments: &serde_json::Value) -> Result<Self, ToolError> {
        let invalid = |reason: String| ToolError::InvalidArguments {
            tool_name: kind.name().to_string(),
            reason,
        };

        match kind {
            ToolKind::SearchKnowledge => {
                let args: SearchKnowledgeArgs = decode(kind, arguments)?;
                let query = non_blank(args.query, "query").map_err(invalid)?;
                Ok(ToolInvocation::SearchKnowledge { query })
            }
            ToolKind::CreateTask => {
                let args: CreateTaskArgs = decode(kind, arguments)?;
                let title = non_blank(args.title, "title").map_err(invalid)?;
                Ok(ToolInvocation::CreateTask(NewTask {
                    title,
                    description: args
                        .description
                        .map(|d| d.trim().to_string())
                        .filter(|d| !d.is_empty()),
                    due_date: args.due_date,
                    priority: args.priority,
                }))
            }
            ToolKind::CreateAppointment => {
                let args: CreateAppointmentArgs = decode(kind, arguments)?;
                let teacher_id = non_blank(args.teacher_id, "teacher_id").map_err(invalid)?;
                let reason = non_blank(args.reason, "reason").map_err(invalid)?;
                if args.duration_minutes == 0 || args.duration_minutes > MAX_APPOINTMENT_MINUTES {
                    return Err(invalid(format!(
                        "duration_minutes must be between 1 and {MAX_APPOINTMENT_MINUTES}"
                    )));
                }
                Ok(ToolInvocation::CreateAppointment(NewAppointment {
                    teacher_id,
                    start_time: args.start_time,
                    duration_minutes: args.duration_minutes,
                    reason,
                }))
            }
            ToolKind::GetMenu => {
                let args: GetMenuArgs = decode(kind, arguments)?;
                let day = args
                    .day
                    .trim()
                    .parse::<Weekday>()
                    .map_err(|_| invalid(format!("'{}' is not a day of the week", args.day)))?;
                Ok(ToolInvocation::GetMenu { day })
            }
        }
    }
}

fn decode<T: DeserializeOwned>(kind: ToolKind, arguments: &serde_json::Value) -> Result<T, ToolError> {
    let invalid = |reason: String| ToolError::InvalidArguments {
        tool_name: kind.name().to_string(),
        reason,
    };

    match arguments {
        serde_json::Value::Object(_) => {
            T::deserialize(arguments).map_err(|e| invalid(e.to_string()))
        }
        // Raw strings are arguments the provider could not parse as JSON.
        serde_json::Value::String(_) => Err(invalid("arguments are not valid JSON".into())),
        other => Err(invalid(format!("expected a JSON object, got {other}"))),
    }
}

fn non_blank(value: String, field: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("`{field}` must not be empty"))
    } else {
        Ok(trimmed.to_string())
    }
}

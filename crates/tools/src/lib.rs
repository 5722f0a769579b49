//! Tool implementations for CampusDesk.
//!
//! The assistant has a closed set of four capabilities: knowledge search,
//! task creation, appointment booking and menu lookup. Model-supplied
//! arguments are validated into a [`ToolInvocation`] before anything runs,
//! and every execution produces a string for the model to read.
//!
//! The registry itself is stateless with respect to the caller: the identity
//! of the person chatting is passed to [`ToolRegistry::execute`] on each call.

pub mod args;
pub mod create_appointment;
pub mod create_task;
pub mod get_menu;
pub mod local;
pub mod search_knowledge;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use campusdesk_core::error::ToolError;
use campusdesk_core::message::UserId;
use campusdesk_core::provider::ToolDefinition;
use campusdesk_core::services::{AppointmentService, MenuService, TaskService};
use campusdesk_core::tool::{ToolCall, ToolKind};
use campusdesk_knowledge::Retriever;
use tracing::{debug, warn};

pub use args::{MAX_APPOINTMENT_MINUTES, ToolInvocation};
pub use create_appointment::CreateAppointmentTool;
pub use create_task::CreateTaskTool;
pub use get_menu::{GetMenuTool, weekday_name};
pub use local::{InMemoryAppointmentService, InMemoryTaskService, StaticMenuService};
pub use search_knowledge::{NO_RESULTS, SearchKnowledgeTool};

/// The assistant's tools, bound to their collaborators.
///
/// Built once and shared across conversations.
pub struct ToolRegistry {
    search: SearchKnowledgeTool,
    tasks: CreateTaskTool,
    appointments: CreateAppointmentTool,
    menu: GetMenuTool,
}

impl ToolRegistry {
    pub fn new(
        retriever: Retriever,
        tasks: Arc<dyn TaskService>,
        appointments: Arc<dyn AppointmentService>,
        menus: Arc<dyn MenuService>,
    ) -> Self {
        Self {
            search: SearchKnowledgeTool::new(retriever),
            tasks: CreateTaskTool::new(tasks),
            appointments: CreateAppointmentTool::new(appointments),
            menu: GetMenuTool::new(menus),
        }
    }

    /// Number of knowledge results returned by `search_knowledge`.
    pub fn with_search_top_k(mut self, top_k: usize) -> Self {
        self.search = self.search.with_top_k(top_k);
        self
    }

    /// Tool definitions sent to the language model, in a fixed order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL.iter().map(|kind| kind.to_definition()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        ToolKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Resolve the tool name and validate its arguments.
    pub fn prepare(&self, call: &ToolCall) -> Result<ToolInvocation, ToolError> {
        let kind =
            ToolKind::from_name(&call.name).ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        ToolInvocation::parse(kind, &call.arguments)
    }

    /// Run a validated invocation on behalf of `user`.
    pub async fn run(&self, user: &UserId, invocation: ToolInvocation) -> String {
        debug!(tool = invocation.kind().name(), user_id = %user, "Running tool");
        match invocation {
            ToolInvocation::SearchKnowledge { query } => self.search.execute(&query).await,
            ToolInvocation::CreateTask(task) => self.tasks.execute(user, task).await,
            ToolInvocation::CreateAppointment(appointment) => {
                self.appointments.execute(user, appointment).await
            }
            ToolInvocation::GetMenu { day } => self.menu.execute(day).await,
        }
    }

    /// Validate and run a model tool call.
    ///
    /// Never fails: unknown tools and malformed arguments come back as an
    /// error string the model can read and correct.
    pub async fn execute(&self, user: &UserId, call: &ToolCall) -> String {
        match self.prepare(call) {
            Ok(invocation) => self.run(user, invocation).await,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Rejected tool call");
                format!("Error: {e}")
            }
        }
    }
}

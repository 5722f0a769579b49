//! Task creation tool: delegates to the task service.

use std::sync::Arc;

use campusdesk_core::message::UserId;
use campusdesk_core::services::{NewTask, TaskService};
use tracing::{info, warn};

pub struct CreateTaskTool {
    service: Arc<dyn TaskService>,
}

impl CreateTaskTool {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, owner: &UserId, task: NewTask) -> String {
        match self.service.create_task(owner, task).await {
            Ok(created) => {
                info!(task_id = %created.id, "Task created");
                format!(
                    "Created task \"{}\" (id {}) with {} priority, due {}.",
                    created.title,
                    created.id,
                    created.priority,
                    created.due_date.format("%Y-%m-%d")
                )
            }
            Err(e) => {
                warn!(error = %e, "Task creation failed");
                format!("Failed to create task: {e}")
            }
        }
    }
}

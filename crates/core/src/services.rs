//! Domain collaborators: the narrow operations the assistant delegates to.
//!
//! Each trait exposes exactly one fallible operation consumed by one tool.
//! The CRUD services behind them live outside this workspace.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::message::UserId;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Top,
    Moderate,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Top => "Top",
            Priority::Moderate => "Moderate",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

/// A task to create on behalf of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

/// A task as stored by the task service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

/// An appointment to book on behalf of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub teacher_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub reason: String,
}

/// An appointment as stored by the appointment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub teacher_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// One dish on a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// The cafeteria menu for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub day: chrono::Weekday,
    pub items: Vec<MenuItem>,
}

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn create_task(&self, owner: &UserId, task: NewTask) -> Result<Task, ServiceError>;
}

#[async_trait]
pub trait AppointmentService: Send + Sync {
    async fn create_appointment(
        &self,
        requester: &UserId,
        appointment: NewAppointment,
    ) -> Result<Appointment, ServiceError>;
}

#[async_trait]
pub trait MenuService: Send + Sync {
    /// `Ok(None)` when no menu is published for that day.
    async fn menu_for_day(&self, day: chrono::Weekday) -> Result<Option<Menu>, ServiceError>;
}

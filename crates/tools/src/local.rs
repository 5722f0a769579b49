//! In-process service implementations.
//!
//! Used by the CLI and by tests in place of the external CRUD services.
//! State lives behind a `tokio::sync::RwLock` and is lost on exit.

use std::collections::HashMap;

use async_trait::async_trait;
use campusdesk_core::error::ServiceError;
use campusdesk_core::message::UserId;
use campusdesk_core::services::{
    Appointment, AppointmentService, Menu, MenuService, NewAppointment, NewTask, Task,
    TaskService,
};
use chrono::{Duration, Weekday};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Tasks grouped by owner.
#[derive(Default)]
pub struct InMemoryTaskService {
    tasks: RwLock<HashMap<UserId, Vec<Task>>>,
}

impl InMemoryTaskService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn tasks_for(&self, owner: &UserId) -> Vec<Task> {
        self.tasks.read().await.get(owner).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl TaskService for InMemoryTaskService {
    async fn create_task(&self, owner: &UserId, task: NewTask) -> Result<Task, ServiceError> {
        let created = Task {
            id: Uuid::new_v4().to_string(),
            title: task.title,
            due_date: task.due_date,
            priority: task.priority,
        };
        self.tasks
            .write()
            .await
            .entry(owner.clone())
            .or_default()
            .push(created.clone());
        Ok(created)
    }
}

/// Appointments, rejecting overlaps for the same teacher.
#[derive(Default)]
pub struct InMemoryAppointmentService {
    appointments: RwLock<Vec<(UserId, Appointment)>>,
}

impl InMemoryAppointmentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn appointments_for(&self, requester: &UserId) -> Vec<Appointment> {
        self.appointments
            .read()
            .await
            .iter()
            .filter(|(who, _)| who == requester)
            .map(|(_, appt)| appt.clone())
            .collect()
    }
}

fn overlaps(existing: &Appointment, candidate: &NewAppointment) -> bool {
    let existing_end =
        existing.start_time + Duration::minutes(i64::from(existing.duration_minutes));
    let candidate_end =
        candidate.start_time + Duration::minutes(i64::from(candidate.duration_minutes));
    existing.start_time < candidate_end && candidate.start_time < existing_end
}

#[async_trait]
impl AppointmentService for InMemoryAppointmentService {
    async fn create_appointment(
        &self,
        requester: &UserId,
        appointment: NewAppointment,
    ) -> Result<Appointment, ServiceError> {
        let mut appointments = self.appointments.write().await;

        if appointments
            .iter()
            .any(|(_, a)| a.teacher_id == appointment.teacher_id && overlaps(a, &appointment))
        {
            return Err(ServiceError::Rejected(format!(
                "teacher {} already has an appointment at that time",
                appointment.teacher_id
            )));
        }

        let booked = Appointment {
            id: Uuid::new_v4().to_string(),
            teacher_id: appointment.teacher_id,
            start_time: appointment.start_time,
            duration_minutes: appointment.duration_minutes,
        };
        appointments.push((requester.clone(), booked.clone()));
        Ok(booked)
    }
}

/// A fixed weekly menu.
pub struct StaticMenuService {
    menus: HashMap<Weekday, Menu>,
}

impl StaticMenuService {
    pub fn new(menus: Vec<Menu>) -> Self {
        Self {
            menus: menus.into_iter().map(|m| (m.day, m)).collect(),
        }
    }
}

#[async_trait]
impl MenuService for StaticMenuService {
    async fn menu_for_day(&self, day: Weekday) -> Result<Option<Menu>, ServiceError> {
        Ok(self.menus.get(&day).cloned())
    }
}

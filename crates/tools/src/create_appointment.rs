//! Appointment booking tool: delegates to the appointment service.

use std::sync::Arc;

use campusdesk_core::message::UserId;
use campusdesk_core::services::{AppointmentService, NewAppointment};
use tracing::{info, warn};

pub struct CreateAppointmentTool {
    service: Arc<dyn AppointmentService>,
}

impl CreateAppointmentTool {
    pub fn new(service: Arc<dyn AppointmentService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, requester: &UserId, appointment: NewAppointment) -> String {
        match self.service.create_appointment(requester, appointment).await {
            Ok(booked) => {
                info!(appointment_id = %booked.id, "Appointment booked");
                format!(
                    "Booked appointment {} with teacher {} on {} for {} minutes.",
                    booked.id,
                    booked.teacher_id,
                    booked.start_time.format("%Y-%m-%d %H:%M UTC"),
                    booked.duration_minutes
                )
            }
            Err(e) => {
                warn!(error = %e, "Appointment booking failed");
                format!("Failed to create appointment: {e}")
            }
        }
    }
}

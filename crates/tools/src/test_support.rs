//! Collaborators for the tool tests.

use std::sync::Arc;

use async_trait::async_trait;
use campusdesk_core::error::{ProviderError, ServiceError};
use campusdesk_core::knowledge::KnowledgeDocument;
use campusdesk_core::message::UserId;
use campusdesk_core::provider::EmbeddingProvider;
use campusdesk_core::services::{
    Appointment, AppointmentService, Menu, MenuService, NewAppointment, NewTask, Task,
    TaskService,
};
use campusdesk_knowledge::{KnowledgeIndex, Retriever, StaticKnowledgeSource};
use chrono::Weekday;

/// Embeds text along three axes: rooms, library, food.
pub struct KeywordEmbedder;

fn keyword_vector(text: &str) -> Vec<f32> {
    let text = text.to_lowercase();
    let axis = |words: &[&str]| {
        if words.iter().any(|w| text.contains(w)) { 1.0 } else { 0.05 }
    };
    vec![
        axis(&["room"]),
        axis(&["library", "book"]),
        axis(&["cafeteria", "lunch", "food"]),
    ]
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(inputs.iter().map(|s| keyword_vector(s)).collect())
    }
}

pub fn campus_retriever() -> Retriever {
    let source = StaticKnowledgeSource::new(vec![
        KnowledgeDocument::new("Room 203 is IT"),
        KnowledgeDocument::new("Room 204 is Library"),
        KnowledgeDocument::new("The cafeteria serves lunch from 11:30"),
    ]);
    Retriever::new(Arc::new(KnowledgeIndex::new(
        Arc::new(source),
        Arc::new(KeywordEmbedder),
    )))
}

/// Every service operation fails.
pub struct DownService;

fn down() -> ServiceError {
    ServiceError::Unavailable("scheduled maintenance".into())
}

#[async_trait]
impl TaskService for DownService {
    async fn create_task(&self, _owner: &UserId, _task: NewTask) -> Result<Task, ServiceError> {
        Err(down())
    }
}

#[async_trait]
impl AppointmentService for DownService {
    async fn create_appointment(
        &self,
        _requester: &UserId,
        _appointment: NewAppointment,
    ) -> Result<Appointment, ServiceError> {
        Err(down())
    }
}

#[async_trait]
impl MenuService for DownService {
    async fn menu_for_day(&self, _day: Weekday) -> Result<Option<Menu>, ServiceError> {
        Err(down())
    }
}

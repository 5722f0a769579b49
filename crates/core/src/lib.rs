//! # CampusDesk Core
//!
//! Domain types, traits, and error definitions for the CampusDesk assistant.
//! This crate has **zero framework dependencies**: it defines the domain model
//! that all other crates implement against.
//!
//! Every external capability (language model, embeddings, knowledge store,
//! task/appointment/menu services) is a trait here. Implementations live in
//! their respective crates or outside the workspace entirely.

pub mod error;
pub mod knowledge;
pub mod message;
pub mod provider;
pub mod services;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, KnowledgeError, ProviderError, Result, ServiceError, ToolError};
pub use knowledge::{KnowledgeDocument, KnowledgeSource};
pub use message::{Message, Role, UserId};
pub use provider::{EmbeddingProvider, Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use services::{
    Appointment, AppointmentService, Menu, MenuItem, MenuService, NewAppointment, NewTask,
    Priority, Task, TaskService,
};
pub use tool::{ToolCall, ToolKind};

//! LLM and embedding provider implementations for CampusDesk.
//!
//! All providers implement `campusdesk_core::Provider` and/or
//! `campusdesk_core::EmbeddingProvider`.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

//! Knowledge source trait: the read-only store the knowledge index is
//! built from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::KnowledgeError;

/// A document as stored by the knowledge collaborator, before embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// The text that gets embedded and returned by searches
    pub content: String,

    /// Free-form category (e.g. "rooms", "services")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Arbitrary extra attributes
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl KnowledgeDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            category: None,
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// The knowledge collaborator. Implementations: JSON seed file, static list.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// The source name (e.g., "json_file", "static").
    fn name(&self) -> &str;

    /// Load every document, in a stable order.
    async fn list_all(&self) -> std::result::Result<Vec<KnowledgeDocument>, KnowledgeError>;
}

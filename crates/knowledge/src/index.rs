//! The in-memory knowledge index.
//!
//! Built lazily, exactly once, from a [`KnowledgeSource`] and an
//! [`EmbeddingProvider`]. Concurrent first callers share a single build
//! (one `embed_batch` call); once built, reads go straight to the
//! initialized cell without locking.

use std::sync::Arc;
use std::time::Duration;

use campusdesk_core::error::{KnowledgeError, ProviderError};
use campusdesk_core::knowledge::KnowledgeSource;
use campusdesk_core::provider::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// One embedded piece of knowledge. Immutable once the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub content: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Lazily built, read-only-after-build store of knowledge records.
pub struct KnowledgeIndex {
    source: Arc<dyn KnowledgeSource>,
    embedder: Arc<dyn EmbeddingProvider>,
    source_timeout: Duration,
    embedding_timeout: Duration,
    records: OnceCell<Vec<KnowledgeRecord>>,
}

impl KnowledgeIndex {
    pub fn new(source: Arc<dyn KnowledgeSource>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            source,
            embedder,
            source_timeout: Duration::from_secs(30),
            embedding_timeout: Duration::from_secs(30),
            records: OnceCell::new(),
        }
    }

    /// Bound the knowledge store read made by each build.
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Bound every embedding call made through this index.
    pub fn with_embedding_timeout(mut self, timeout: Duration) -> Self {
        self.embedding_timeout = timeout;
        self
    }

    /// Build the index if it has not been built yet and return its records.
    ///
    /// Single-flight: concurrent callers wait on the same build. A failed
    /// build leaves the index unbuilt so a later call can retry.
    pub async fn ensure_built(&self) -> Result<&[KnowledgeRecord], KnowledgeError> {
        self.records
            .get_or_try_init(|| self.build())
            .await
            .map(Vec::as_slice)
    }

    /// Records of a built index, or `None` before the first successful build.
    pub fn records(&self) -> Option<&[KnowledgeRecord]> {
        self.records.get().map(Vec::as_slice)
    }

    pub fn is_built(&self) -> bool {
        self.records.initialized()
    }

    /// Number of records, zero when unbuilt.
    pub fn len(&self) -> usize {
        self.records().map_or(0, <[_]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard the built records so the next use reloads and re-embeds.
    pub fn reset(&mut self) {
        if self.records.take().is_some() {
            info!("Knowledge index reset");
        }
    }

    /// Embed a single query with the index's embedder and timeout.
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, ProviderError> {
        match tokio::time::timeout(self.embedding_timeout, self.embedder.embed_one(query)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(format!(
                "query embedding after {}s",
                self.embedding_timeout.as_secs()
            ))),
        }
    }

    async fn build(&self) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
        let documents = match tokio::time::timeout(self.source_timeout, self.source.list_all()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(KnowledgeError::SourceUnavailable(format!(
                    "{} did not respond within {}s",
                    self.source.name(),
                    self.source_timeout.as_secs()
                )));
            }
        };

        if documents.is_empty() {
            warn!(
                source = self.source.name(),
                "Knowledge source returned no documents; index stays empty"
            );
            return Ok(Vec::new());
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        debug!(count = contents.len(), "Embedding knowledge documents");

        let embeddings =
            match tokio::time::timeout(self.embedding_timeout, self.embedder.embed_batch(&contents))
                .await
            {
                Ok(result) => result?,
                Err(_) => {
                    return Err(KnowledgeError::EmbeddingFailed(ProviderError::Timeout(
                        format!("batch embedding after {}s", self.embedding_timeout.as_secs()),
                    )));
                }
            };

        if embeddings.len() != documents.len() {
            return Err(KnowledgeError::EmbeddingFailed(ProviderError::InvalidResponse(
                format!(
                    "expected {} embeddings, got {}",
                    documents.len(),
                    embeddings.len()
                ),
            )));
        }

        let records: Vec<KnowledgeRecord> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(doc, embedding)| {
                let mut metadata = doc.metadata;
                if let Some(category) = doc.category {
                    metadata.insert("category".into(), serde_json::Value::String(category));
                }
                KnowledgeRecord {
                    content: doc.content,
                    embedding,
                    metadata,
                }
            })
            .collect();

        info!(
            source = self.source.name(),
            count = records.len(),
            "Knowledge index built"
        );
        Ok(records)
    }
}

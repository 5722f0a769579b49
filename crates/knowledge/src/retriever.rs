//! Nearest-neighbor search over the knowledge index.

use std::sync::Arc;

use campusdesk_core::error::KnowledgeError;
use tracing::{debug, warn};

use crate::index::KnowledgeIndex;
use crate::vector;

/// Number of results returned when the caller does not say otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// A search hit with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub content: String,
    pub score: f32,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Cosine-similarity search over a shared [`KnowledgeIndex`].
#[derive(Clone)]
pub struct Retriever {
    index: Arc<KnowledgeIndex>,
}

impl Retriever {
    pub fn new(index: Arc<KnowledgeIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Arc<KnowledgeIndex> {
        &self.index
    }

    /// Search, reporting failures.
    ///
    /// An empty index yields `Ok(vec![])` without embedding the query.
    pub async fn try_search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, KnowledgeError> {
        let records = self
            .index
            .ensure_built()
            .await
            .map_err(|e| KnowledgeError::RetrievalUnavailable(e.to_string()))?;

        if records.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .index
            .embed_query(query)
            .await
            .map_err(|e| KnowledgeError::RetrievalUnavailable(e.to_string()))?;

        let hits: Vec<SearchHit> = vector::top_k(records, &query_embedding, k)
            .into_iter()
            .map(|scored| SearchHit {
                content: scored.record.content.clone(),
                score: scored.score,
                metadata: scored.record.metadata.clone(),
            })
            .collect();

        debug!(query, k, hits = hits.len(), "Knowledge search");
        Ok(hits)
    }

    /// Search and return the top-`k` contents, best first.
    ///
    /// Never fails: retrieval problems are logged and produce no results.
    pub async fn search(&self, query: &str, k: usize) -> Vec<String> {
        match self.try_search(query, k).await {
            Ok(hits) => hits.into_iter().map(|h| h.content).collect(),
            Err(e) => {
                warn!(error = %e, "Knowledge search failed, returning no results");
                Vec::new()
            }
        }
    }
}

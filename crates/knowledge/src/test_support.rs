//! Scripted collaborators for the knowledge tests.

use async_trait::async_trait;
use campusdesk_core::error::{KnowledgeError, ProviderError};
use campusdesk_core::knowledge::{KnowledgeDocument, KnowledgeSource};
use campusdesk_core::provider::EmbeddingProvider;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Returns fixed document vectors for batches and per-text query vectors,
/// counting every call.
pub struct CountingEmbedder {
    vectors: Vec<Vec<f32>>,
    queries: HashMap<String, Vec<f32>>,
    delay: Option<Duration>,
    truncate: Option<usize>,
    fail_queries: bool,
    fail_next_batch: AtomicBool,
    batch_calls: AtomicUsize,
    query_calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            vectors,
            queries: HashMap::new(),
            delay: None,
            truncate: None,
            fail_queries: false,
            fail_next_batch: AtomicBool::new(false),
            batch_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_query(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.queries.insert(text.to_string(), vector);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn truncating(mut self, len: usize) -> Self {
        self.truncate = Some(len);
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn fail_next_batch(&self) {
        self.fail_next_batch.store(true, Ordering::SeqCst);
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for CountingEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_next_batch.swap(false, Ordering::SeqCst) {
            return Err(ProviderError::Network("connection refused".into()));
        }
        let len = self.truncate.unwrap_or(inputs.len());
        Ok(self.vectors.iter().take(len).cloned().collect())
    }

    async fn embed_one(&self, input: &str) -> Result<Vec<f32>, ProviderError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries {
            return Err(ProviderError::Network("connection refused".into()));
        }
        Ok(self.queries.get(input).cloned().unwrap_or_else(|| vec![1.0, 1.0]))
    }
}

/// A knowledge store that is always down.
pub struct FailingSource;

#[async_trait]
impl KnowledgeSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn list_all(&self) -> Result<Vec<KnowledgeDocument>, KnowledgeError> {
        Err(KnowledgeError::SourceUnavailable("database offline".into()))
    }
}

/// A knowledge store that never answers.
pub struct HangingSource;

#[async_trait]
impl KnowledgeSource for HangingSource {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn list_all(&self) -> Result<Vec<KnowledgeDocument>, KnowledgeError> {
        tokio::time::sleep(Duration::from_secs(100_000)).await;
        Ok(Vec::new())
    }
}

//! Knowledge search tool: semantic lookup in the campus knowledge base.

use campusdesk_knowledge::{DEFAULT_TOP_K, Retriever};

/// Returned to the model when a search finds nothing.
pub const NO_RESULTS: &str = "No relevant information was found in the knowledge base.";

pub struct SearchKnowledgeTool {
    retriever: Retriever,
    top_k: usize,
}

impl SearchKnowledgeTool {
    pub fn new(retriever: Retriever) -> Self {
        Self {
            retriever,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub async fn execute(&self, query: &str) -> String {
        let results = self.retriever.search(query, self.top_k).await;
        if results.is_empty() {
            NO_RESULTS.to_string()
        } else {
            results.join("\n\n")
        }
    }
}

//! Knowledge base for CampusDesk: a lazily built in-memory embedding index
//! and a cosine-similarity retriever over it.

pub mod index;
pub mod retriever;
pub mod source;
pub mod vector;

#[cfg(test)]
mod test_support;

pub use index::{KnowledgeIndex, KnowledgeRecord};
pub use retriever::{DEFAULT_TOP_K, Retriever, SearchHit};
pub use source::{JsonFileKnowledgeSource, StaticKnowledgeSource};
pub use vector::{ScoredRecord, cosine_similarity, top_k};

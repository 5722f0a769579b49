//! Error types for the CampusDesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all CampusDesk operations.
///
/// Only [`Error::UpstreamUnavailable`] and index build failures ever reach
/// the caller of a chat; tool and retrieval failures are absorbed into the
/// conversation as text.
#[derive(Debug, Error)]
pub enum Error {
    // --- Language model / embedding provider unreachable ---
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] ProviderError),

    // --- Knowledge errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Error)]
pub enum KnowledgeError {
    /// The knowledge store could not be read.
    #[error("Knowledge source unavailable: {0}")]
    SourceUnavailable(String),

    /// Embedding the index contents failed.
    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(#[from] ProviderError),

    /// A search could not be served. Recovered locally as an empty result.
    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Tool timed out: {tool_name} after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },

    #[error("Invalid arguments for {tool_name}: {reason}")]
    InvalidArguments { tool_name: String, reason: String },
}

/// Failure reported by a delegated domain collaborator (tasks, appointments, menus).
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether this error means the language model or embedding provider
    /// could not be reached.
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            Error::UpstreamUnavailable(_) | Error::Knowledge(KnowledgeError::EmbeddingFailed(_))
        )
    }
}

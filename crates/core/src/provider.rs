//! Provider traits: the abstraction over the language model and the
//! embedding model.
//!
//! A Provider knows how to send a conversation to an LLM and get the next
//! assistant message back: either plain text or a set of tool calls.
//! An EmbeddingProvider turns text into fixed-dimension vectors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;
use crate::tool::ToolCall;

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gpt-4o-mini")
    pub model: String,

    /// The conversation messages, system prompt first
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

fn default_temperature() -> f32 {
    0.2
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Generated text (may be empty when tool calls are present)
    pub content: String,

    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

impl ProviderResponse {
    /// The response as an `Ai` conversation message.
    pub fn into_message(self) -> Message {
        Message::ai_with_tools(self.content, self.tool_calls)
    }
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The language model capability.
///
/// The agent loop calls `complete()` without knowing which backend serves it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get the next assistant message.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}

/// The embedding capability. Vector dimensionality is fixed per provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed many texts in one call; one vector per input, in input order.
    async fn embed_batch(
        &self,
        inputs: &[String],
    ) -> std::result::Result<Vec<Vec<f32>>, ProviderError>;

    /// Embed a single text.
    ///
    /// Default implementation delegates to `embed_batch`.
    async fn embed_one(&self, input: &str) -> std::result::Result<Vec<f32>, ProviderError> {
        let mut vectors = self.embed_batch(&[input.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            ProviderError::InvalidResponse("embedding response contained no vectors".into())
        })
    }
}

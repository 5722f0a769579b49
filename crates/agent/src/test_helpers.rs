//! Shared test helpers for agent tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use campusdesk_core::error::{ProviderError, ServiceError};
use campusdesk_core::knowledge::KnowledgeDocument;
use campusdesk_core::provider::{
    EmbeddingProvider, Provider, ProviderRequest, ProviderResponse, Usage,
};
use campusdesk_core::message::UserId;
use campusdesk_core::services::{NewTask, Task, TaskService};
use campusdesk_core::tool::ToolCall;
use campusdesk_knowledge::{KnowledgeIndex, Retriever, StaticKnowledgeSource};
use campusdesk_tools::{InMemoryAppointmentService, StaticMenuService, ToolRegistry};

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue and
/// records the request. Panics if more calls are made than responses provided.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that returns a single text response (no tool calls).
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![make_text_response(text)])
    }

    /// Create a provider that first returns tool calls, then a final answer.
    pub fn tool_then_answer(tool_calls: Vec<ToolCall>, thought: &str, answer: &str) -> Self {
        Self::new(vec![
            make_tool_call_response(tool_calls, thought),
            make_text_response(answer),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if requests.len() >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                requests.len(),
                responses.len()
            );
        }

        let response = responses[requests.len()].clone();
        requests.push(request);
        Ok(response)
    }
}

/// A provider whose endpoint refuses connections.
pub struct FailingProvider;

#[async_trait::async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Network("connection refused".into()))
    }
}

/// A provider that answers only after a delay.
pub struct SlowProvider(pub Duration);

#[async_trait::async_trait]
impl Provider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        tokio::time::sleep(self.0).await;
        Ok(make_text_response("too late"))
    }
}

/// A task service that answers only after a delay.
pub struct SlowTasks(pub Duration);

#[async_trait::async_trait]
impl TaskService for SlowTasks {
    async fn create_task(&self, _owner: &UserId, task: NewTask) -> Result<Task, ServiceError> {
        tokio::time::sleep(self.0).await;
        Ok(Task {
            id: "task-slow".into(),
            title: task.title,
            due_date: task.due_date,
            priority: task.priority,
        })
    }
}

/// Embeds every text as the same unit vector.
pub struct FlatEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for FlatEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(inputs.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

/// Registry over a two-document knowledge base, an empty menu and the given
/// task service.
pub fn registry_with(tasks: Arc<dyn TaskService>) -> Arc<ToolRegistry> {
    let source = StaticKnowledgeSource::new(vec![
        KnowledgeDocument::new("Room 203 is IT"),
        KnowledgeDocument::new("Room 204 is Library"),
    ]);
    let index = KnowledgeIndex::new(Arc::new(source), Arc::new(FlatEmbedder));
    Arc::new(ToolRegistry::new(
        Retriever::new(Arc::new(index)),
        tasks,
        Arc::new(InMemoryAppointmentService::new()),
        Arc::new(StaticMenuService::new(vec![])),
    ))
}

/// Create a simple text response (no tool calls).
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        content: text.to_string(),
        tool_calls: vec![],
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Create a response with tool calls and optional thought content.
pub fn make_tool_call_response(tool_calls: Vec<ToolCall>, thought: &str) -> ProviderResponse {
    ProviderResponse {
        content: thought.to_string(),
        tool_calls,
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Helper to create a tool call.
pub fn make_tool_call(name: &str, args: serde_json::Value) -> ToolCall {
    ToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: args,
    }
}

//! The agent reasoning loop implementation.
//!
//! A small state machine: `Agent` asks the language model for the next turn,
//! `Tools` runs the calls that turn requested, `End` returns the answer.
//! The loop never ends while tool calls are outstanding.

use std::sync::Arc;
use std::time::Duration;

use campusdesk_config::AppConfig;
use campusdesk_core::error::{ProviderError, ToolError};
use campusdesk_core::message::UserId;
use campusdesk_core::provider::{Provider, ProviderRequest, ProviderResponse};
use campusdesk_core::tool::ToolCall;
use campusdesk_tools::ToolRegistry;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::conversation::ConversationState;

/// Answer returned when the round-trip bound is reached.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "I'm sorry, I couldn't complete that request. Please try rephrasing or breaking it into smaller steps.";

/// Result of one run of the loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome {
    /// Text returned to the caller
    pub answer: String,

    /// Language model turns taken
    pub iterations: u32,

    /// Tool calls executed, including rejected ones
    pub tool_calls: usize,

    /// Whether the loop stopped on the round-trip bound
    pub bound_hit: bool,
}

enum LoopState {
    Agent,
    Tools(Vec<ToolCall>),
    End,
}

/// Orchestrates language model turns and tool execution.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// Tools, shared across conversations
    tools: Arc<ToolRegistry>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Maximum agent↔tools round trips per run
    max_iterations: u32,

    model_timeout: Duration,
    tool_timeout: Duration,
    fallback_message: String,
}

impl AgentLoop {
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>, model: impl Into<String>) -> Self {
        Self {
            provider,
            tools,
            model: model.into(),
            temperature: 0.2,
            max_tokens: None,
            max_iterations: 10,
            model_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(30),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.into(),
        }
    }

    /// Model settings, bound and timeouts from configuration.
    pub fn from_config(
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        config: &AppConfig,
    ) -> Self {
        Self::new(provider, tools, config.default_model.clone())
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_max_iterations(config.agent.max_iterations)
            .with_model_timeout(Duration::from_secs(config.agent.model_timeout_secs))
            .with_tool_timeout(Duration::from_secs(config.agent.tool_timeout_secs))
            .with_fallback_message(config.agent.fallback_message.clone())
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set the maximum number of agent↔tools round trips.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Drive the conversation to its final answer.
    ///
    /// Tool failures of any kind are fed back to the model as text. Only a
    /// language model failure, including a timeout, is returned as an error.
    pub async fn run(
        &self,
        conversation: &mut ConversationState,
        user: &UserId,
    ) -> Result<AgentOutcome, campusdesk_core::Error> {
        let tool_definitions = self.tools.definitions();
        let mut iterations = 0;
        let mut tool_calls = 0;
        let mut state = LoopState::Agent;

        loop {
            state = match state {
                LoopState::Agent => {
                    if iterations >= self.max_iterations {
                        warn!(
                            user_id = %user,
                            iterations,
                            "Round-trip bound reached, returning fallback answer"
                        );
                        return Ok(AgentOutcome {
                            answer: self.fallback_message.clone(),
                            iterations,
                            tool_calls,
                            bound_hit: true,
                        });
                    }
                    iterations += 1;
                    debug!(user_id = %user, iteration = iterations, "Agent turn");

                    let request = ProviderRequest {
                        model: self.model.clone(),
                        messages: conversation.messages().to_vec(),
                        temperature: self.temperature,
                        max_tokens: self.max_tokens,
                        tools: tool_definitions.clone(),
                    };
                    let response = self.complete(request).await?;

                    let message = response.into_message();
                    let calls = message.tool_calls().to_vec();
                    conversation.push_ai(message);

                    if calls.is_empty() {
                        LoopState::End
                    } else {
                        LoopState::Tools(calls)
                    }
                }
                LoopState::Tools(calls) => {
                    debug!(tool_count = calls.len(), "Executing tool calls");
                    let outputs = self.execute_tools(user, &calls).await;
                    for (call, output) in calls.iter().zip(outputs) {
                        conversation.push_tool_result(call, output);
                    }
                    tool_calls += calls.len();
                    LoopState::Agent
                }
                LoopState::End => {
                    let answer = conversation.last_ai_text().unwrap_or_default().to_string();
                    info!(user_id = %user, iterations, tool_calls, "Agent finished");
                    return Ok(AgentOutcome {
                        answer,
                        iterations,
                        tool_calls,
                        bound_hit: false,
                    });
                }
            };
        }
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        match tokio::time::timeout(self.model_timeout, self.provider.complete(request)).await {
            Ok(result) => result.inspect_err(|e| {
                warn!(provider = self.provider.name(), error = %e, "Language model call failed");
            }),
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    timeout_secs = self.model_timeout.as_secs(),
                    "Language model call timed out"
                );
                Err(ProviderError::Timeout(format!(
                    "no response from {} after {}s",
                    self.provider.name(),
                    self.model_timeout.as_secs()
                )))
            }
        }
    }

    /// Run every call concurrently; outputs come back in request order.
    async fn execute_tools(&self, user: &UserId, calls: &[ToolCall]) -> Vec<String> {
        let runs = calls.iter().map(|call| async move {
            match tokio::time::timeout(self.tool_timeout, self.tools.execute(user, call)).await {
                Ok(output) => output,
                Err(_) => {
                    let e = ToolError::Timeout {
                        tool_name: call.name.clone(),
                        timeout_secs: self.tool_timeout.as_secs(),
                    };
                    warn!(tool = %call.name, error = %e, "Tool execution timed out");
                    format!("Error: {e}")
                }
            }
        });
        join_all(runs).await
    }
}

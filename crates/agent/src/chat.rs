//! The public chat entry point.

use std::sync::Arc;
use std::time::Duration;

use campusdesk_config::AppConfig;
use campusdesk_core::error::{Error, KnowledgeError};
use campusdesk_core::knowledge::KnowledgeSource;
use campusdesk_core::message::UserId;
use campusdesk_core::provider::{EmbeddingProvider, Provider};
use campusdesk_core::services::{AppointmentService, MenuService, TaskService};
use campusdesk_knowledge::{KnowledgeIndex, Retriever};
use campusdesk_tools::ToolRegistry;
use chrono::Utc;
use tracing::{info, warn};

use crate::conversation::ConversationState;
use crate::loop_runner::{AgentLoop, AgentOutcome};
use crate::prompt::PromptBuilder;

/// Everything the assistant talks to.
pub struct Collaborators {
    pub provider: Arc<dyn Provider>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub knowledge: Arc<dyn KnowledgeSource>,
    pub tasks: Arc<dyn TaskService>,
    pub appointments: Arc<dyn AppointmentService>,
    pub menus: Arc<dyn MenuService>,
}

/// Answers one message per call. Calls are independent and may run
/// concurrently; the knowledge index is the only shared state.
pub struct ChatService {
    index: Arc<KnowledgeIndex>,
    agent: AgentLoop,
    prompt: PromptBuilder,
}

impl ChatService {
    pub fn new(index: Arc<KnowledgeIndex>, agent: AgentLoop, prompt: PromptBuilder) -> Self {
        Self {
            index,
            agent,
            prompt,
        }
    }

    /// Wire the index, retriever, tools and agent loop from configuration.
    pub fn from_config(config: &AppConfig, collaborators: Collaborators) -> Self {
        let index = Arc::new(
            KnowledgeIndex::new(collaborators.knowledge, collaborators.embedder)
                .with_embedding_timeout(Duration::from_secs(
                    config.knowledge.embedding_timeout_secs,
                ))
                .with_source_timeout(Duration::from_secs(config.knowledge.source_timeout_secs)),
        );

        let tools = Arc::new(
            ToolRegistry::new(
                Retriever::new(index.clone()),
                collaborators.tasks,
                collaborators.appointments,
                collaborators.menus,
            )
            .with_search_top_k(config.knowledge.top_k),
        );

        Self::new(
            index,
            AgentLoop::from_config(collaborators.provider, tools, config),
            PromptBuilder::from_config(&config.identity),
        )
    }

    pub fn index(&self) -> &Arc<KnowledgeIndex> {
        &self.index
    }

    /// Answer `message` on behalf of `user`.
    ///
    /// Fails with [`Error::UpstreamUnavailable`] when the language model or
    /// the embedding model cannot be reached. A knowledge store failure is
    /// not an error: knowledge searches return no results until it recovers.
    pub async fn chat(&self, message: &str, user: &UserId) -> campusdesk_core::Result<String> {
        self.chat_with_outcome(message, user)
            .await
            .map(|outcome| outcome.answer)
    }

    /// Like [`chat`](Self::chat), returning loop statistics as well.
    pub async fn chat_with_outcome(
        &self,
        message: &str,
        user: &UserId,
    ) -> campusdesk_core::Result<AgentOutcome> {
        // An unreadable store only costs retrieval: searches retry the build
        // and come back empty. An unreachable embedding model fails the chat.
        match self.index.ensure_built().await {
            Ok(_) => {}
            Err(KnowledgeError::EmbeddingFailed(provider_error)) => {
                warn!(error = %provider_error, "Knowledge index build failed");
                return Err(Error::UpstreamUnavailable(provider_error));
            }
            Err(e) => {
                warn!(error = %e, "Knowledge store unavailable, continuing without retrieval");
            }
        }

        let system_prompt = self.prompt.render(Utc::now().date_naive());
        let mut conversation = ConversationState::seed(system_prompt, message);

        info!(user_id = %user, "Chat started");
        let outcome = self.agent.run(&mut conversation, user).await?;
        info!(
            user_id = %user,
            iterations = outcome.iterations,
            tool_calls = outcome.tool_calls,
            bound_hit = outcome.bound_hit,
            "Chat finished"
        );
        Ok(outcome)
    }
}

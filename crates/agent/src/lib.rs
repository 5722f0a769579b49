//! The CampusDesk agent: the heart of the assistant.
//!
//! Each chat follows an **Agent → Tools → Agent → … → End** cycle:
//!
//! 1. **Seed** a conversation with the system prompt and the user's message
//! 2. **Ask** the language model for the next turn
//! 3. **If tool calls**: validate and run them, append the results, go to 2
//! 4. **If text**: return it to the caller
//!
//! The loop stops on a text turn or when the round-trip bound is reached.

pub mod chat;
pub mod conversation;
pub mod loop_runner;
pub mod prompt;

#[cfg(test)]
mod test_helpers;

pub use chat::{ChatService, Collaborators};
pub use conversation::ConversationState;
pub use loop_runner::{AgentLoop, AgentOutcome, DEFAULT_FALLBACK_MESSAGE};
pub use prompt::PromptBuilder;

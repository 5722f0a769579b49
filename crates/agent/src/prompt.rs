//! System prompt assembly.

use campusdesk_config::IdentityConfig;
use campusdesk_core::tool::ToolKind;
use chrono::NaiveDate;

const DEFAULT_INSTRUCTIONS: &str = "\
You help students and staff with campus questions and errands. \
Use the tools to look things up or act on the user's behalf instead of guessing. \
Search the knowledge base before answering questions about rooms, buildings, \
schedules or policies. \
When a tool reports an error, correct the arguments or explain the problem to the user. \
Resolve relative dates such as \"tomorrow\" against today's date. \
Keep answers short and friendly.";

/// Builds the `System` message that starts every conversation.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    assistant_name: String,
    instructions: Option<String>,
}

impl PromptBuilder {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            instructions: None,
        }
    }

    pub fn from_config(identity: &IdentityConfig) -> Self {
        Self {
            assistant_name: identity.assistant_name.clone(),
            instructions: identity.instructions_override.clone(),
        }
    }

    /// Replace the built-in instructions. Capabilities and the date are
    /// still appended.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn render(&self, today: NaiveDate) -> String {
        let mut prompt = format!("You are {}, a campus assistant.\n\n", self.assistant_name);
        prompt.push_str(self.instructions.as_deref().unwrap_or(DEFAULT_INSTRUCTIONS));

        prompt.push_str("\n\nYou can:\n");
        for kind in ToolKind::ALL {
            prompt.push_str(&format!("- {}\n", kind.capability()));
        }

        prompt.push_str(&format!(
            "\nToday is {}.",
            today.format("%A, %Y-%m-%d")
        ));
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::from_config(&IdentityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn lists_every_capability_and_the_date() {
        let prompt = PromptBuilder::default().render(friday());
        assert!(prompt.starts_with("You are CampusDesk"));
        for kind in ToolKind::ALL {
            assert!(prompt.contains(kind.capability()), "missing {kind}");
        }
        assert!(prompt.ends_with("Today is Friday, 2025-03-14."));
    }

    #[test]
    fn instructions_can_be_replaced() {
        let prompt = PromptBuilder::new("Helper")
            .with_instructions("Answer in French.")
            .render(friday());
        assert!(prompt.contains("Answer in French."));
        assert!(!prompt.contains("campus questions and errands"));
        assert!(prompt.contains("2025-03-14"));
    }
}

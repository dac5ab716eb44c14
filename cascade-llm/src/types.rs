//! Request types for generation calls.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use cascade_core::ProviderId;

/// Role of one chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// End-user turn.
    User,
    /// Model turn from earlier in the conversation.
    Assistant,
}

impl ChatRole {
    /// Wire name used by the Claude and OpenAI APIs. Gemini renames the
    /// assistant role to "model" and does so in its own adapter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced this message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A user-authored message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// A prior assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A generation request routed through the fallback service.
///
/// Temperature is passed through unclamped — provider APIs reject values
/// they don't accept, and that rejection is classified like any other
/// failure.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Ordered conversation history.
    pub messages: Vec<ChatMessage>,
    /// Optional system instruction.
    pub system: Option<String>,
    /// Maximum tokens to generate (≥ 1).
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Optional provider to try first, if it is currently eligible.
    pub preferred: Option<ProviderId>,
    /// Optional deadline; once passed, remaining fallback attempts are
    /// abandoned and the call fails with a deadline error.
    pub deadline: Option<Instant>,
}

impl GenerationRequest {
    /// Create a request from conversation history with default sampling
    /// settings (1024 tokens, temperature 0.7).
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system: None,
            max_tokens: 1024,
            temperature: 0.7,
            preferred: None,
            deadline: None,
        }
    }

    /// Convenience: a single-turn request from one user message.
    #[must_use]
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::user(content)])
    }

    /// Set the system instruction.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the max-output-tokens bound.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Hint which provider to try first.
    #[must_use]
    pub fn with_preferred(mut self, preferred: ProviderId) -> Self {
        self.preferred = Some(preferred);
        self
    }

    /// Give the whole call (all fallback attempts together) a time budget.
    #[must_use]
    pub fn with_deadline_in(mut self, budget: Duration) -> Self {
        self.deadline = Some(Instant::now() + budget);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let request = GenerationRequest::from_user("Bonjour")
            .with_system("Tu es un assistant utile.")
            .with_max_tokens(256)
            .with_temperature(0.2)
            .with_preferred(ProviderId::Gemini);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert_eq!(request.system.as_deref(), Some("Tu es un assistant utile."));
        assert_eq!(request.max_tokens, 256);
        assert_eq!(request.preferred, Some(ProviderId::Gemini));
        assert!(request.deadline.is_none());
    }

    #[test]
    fn deadline_budget_lands_in_the_future() {
        let request = GenerationRequest::from_user("hi").with_deadline_in(Duration::from_secs(5));
        let deadline = request.deadline.expect("deadline set");
        assert!(deadline > Instant::now());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            sent_at,
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            sent_at,
        }
    }
}

/// Conversation kept only for the lifetime of the chat page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript opened with the assistant's greeting.
    #[must_use]
    pub fn with_greeting(sent_at: DateTime<Utc>) -> Self {
        let mut transcript = Self::new();
        transcript.push(ChatMessage::assistant(
            "Hi! I'm your BrainBridge study assistant. Ask me anything about your course, a tricky concept, or how to plan your revision.",
            sent_at,
        ));
        transcript
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

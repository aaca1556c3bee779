//! Completion provider abstraction

mod groq;

pub use groq::GroqProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
        }
    }
}

/// A single chat message sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for hosted text-completion backends
///
/// Implementations report every failure as an [`crate::Error`] value:
/// missing credentials before any network activity, then client setup, then
/// the call itself.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &'static str;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Send the messages and return the raw completion text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

//! Plan generation via a completion provider

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::Config;
use crate::llm::{ChatMessage, CompletionProvider, GroqProvider};
use crate::prompts::plan_messages;
use crate::secrets::{ApiKey, Secrets};
use crate::Result;

/// A user's goal and the time they have for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub goal: String,
    pub timeframe: String,
}

impl PlanRequest {
    pub fn new(goal: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            timeframe: timeframe.into(),
        }
    }

    /// The prompt pair sent to the provider
    pub fn messages(&self) -> Vec<ChatMessage> {
        plan_messages(&self.goal, &self.timeframe)
    }
}

/// Produces raw plan markdown from a [`PlanRequest`]
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl PlanGenerator {
    /// Create a generator over any provider
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Create a Groq-backed generator from loaded configuration and secrets
    pub fn from_config(config: &Config, secrets: &Secrets) -> Self {
        let api_key = secrets.groq_api_key().map(ApiKey::into_inner);
        let provider = GroqProvider::new(config.llm.clone(), api_key);
        Self::new(Arc::new(provider))
    }

    /// Ask the provider for a weekly plan
    ///
    /// Returns the model's markdown unchanged, which may be empty.
    pub async fn generate(&self, request: &PlanRequest) -> Result<String> {
        info!(
            provider = self.provider.name(),
            model = %self.provider.model(),
            "Generating plan"
        );

        match self.provider.complete(&request.messages()).await {
            Ok(markdown) => {
                info!(chars = markdown.len(), "Plan generated");
                Ok(markdown)
            }
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "Plan generation failed");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for PlanGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanGenerator")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedProvider;
    use crate::llm::Role;
    use crate::Error;

    #[tokio::test]
    async fn test_generate_returns_raw_text() {
        let provider = Arc::new(ScriptedProvider::reply("## Week 1\n- a"));
        let generator = PlanGenerator::new(provider.clone());

        let markdown = generator
            .generate(&PlanRequest::new("Run a 5k", "6 weeks"))
            .await
            .unwrap();

        assert_eq!(markdown, "## Week 1\n- a");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_pair() {
        let provider = Arc::new(ScriptedProvider::reply(""));
        let generator = PlanGenerator::new(provider.clone());

        generator
            .generate(&PlanRequest::new("Run a 5k", "6 weeks"))
            .await
            .unwrap();

        let received = provider.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].role, Role::System);
        assert!(received[1].content.contains("Goal: Run a 5k"));
        assert!(received[1].content.contains("Timeframe: 6 weeks"));
    }

    #[tokio::test]
    async fn test_generate_propagates_provider_error() {
        let provider = Arc::new(ScriptedProvider::fail("connection reset"));
        let generator = PlanGenerator::new(provider);

        let err = generator
            .generate(&PlanRequest::new("Run a 5k", "6 weeks"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Generation { .. }));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_generate_without_key_reports_missing_credential() {
        let provider = GroqProvider::new(Config::default().llm, None);
        let generator = PlanGenerator::new(Arc::new(provider));

        let err = generator
            .generate(&PlanRequest::new("Run a 5k", "6 weeks"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingCredential { .. }));
        assert!(err.to_string().starts_with("Groq API key not found"));
    }
}

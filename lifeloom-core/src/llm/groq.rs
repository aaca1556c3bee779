//! Groq chat completions provider
//!
//! Groq exposes an OpenAI-compatible `chat/completions` endpoint. Each call
//! is a single stateless request; there is no retry on failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ChatMessage, CompletionProvider};
use crate::config::LlmConfig;
use crate::secrets::GROQ_API_KEY_ENV;
use crate::{Error, Result};

const PROVIDER: &str = "Groq";

/// Chat completions request body
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// Chat completions response body (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

/// Groq-backed [`CompletionProvider`]
#[derive(Clone)]
pub struct GroqProvider {
    config: LlmConfig,
    api_key: Option<String>,
}

impl GroqProvider {
    /// Create a provider; the key is checked when a completion is requested
    pub fn new(config: LlmConfig, api_key: Option<String>) -> Self {
        Self { config, api_key }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential {
                provider: PROVIDER,
                env_var: GROQ_API_KEY_ENV,
            })
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| Error::ClientInit(e.to_string()))
    }
}

impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("model", &self.config.model)
            .field("api_url", &self.config.api_url)
            .field("temperature", &self.config.temperature)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self.api_key()?;
        let client = self.build_client()?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        };

        debug!(
            url = %self.config.api_url,
            model = %self.config.model,
            temperature = self.config.temperature,
            "Sending chat completion request"
        );

        let response = client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| generation_error(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(generation_error(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| generation_error(format!("Failed to parse response: {}", e)))?;

        if let Some(ref usage) = body.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        extract_content(body)
    }
}

fn generation_error(message: String) -> Error {
    Error::Generation {
        provider: PROVIDER,
        message,
    }
}

/// Pull the completion text out of the first choice
fn extract_content(body: ChatCompletionResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| generation_error("No choices in response".to_string()))
}

use std::time::Duration;

use async_trait::async_trait;
use econbr_models::ModelConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AgentError;

/// Abstraction over the chat-completions endpoint. Mockable for testing.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one system + user exchange and return the assistant text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, AgentError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// HTTP client for an OpenAI-compatible chat-completions API.
///
/// Handles bearer authentication and a single retry on transient errors
/// (429, 5xx). The endpoint comes from configuration, so tests point it at
/// a local mock server.
pub struct ChatClient {
    client: reqwest::Client,
    config: ModelConfig,
    max_retries: u32,
}

impl ChatClient {
    pub fn new(client: reqwest::Client, config: ModelConfig) -> Self {
        Self {
            client,
            config,
            max_retries: 1,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.config.name
    }

    fn request_body(&self, system: &str, user: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.name.clone(),
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl ChatModel for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AgentError> {
        let url = format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'));
        let body = self.request_body(system, user);
        let timeout = Duration::from_secs(self.config.request_timeout_seconds);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying chat request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_token)
                .timeout(timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| AgentError::Provider(format!("HTTP request failed: {e}")))?;

            let status = response.status();
            debug!(status = %status, attempt, "chat response received");

            if status.is_success() {
                let parsed: ChatResponse = response
                    .json()
                    .await
                    .map_err(|e| AgentError::Parse(format!("malformed API response: {e}")))?;
                let content = parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .unwrap_or_default();
                if content.trim().is_empty() {
                    return Err(AgentError::Provider("empty completion".to_string()));
                }
                return Ok(content);
            }

            let text = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(AgentError::Provider(format!("API returned {status}: {text}")));
                continue;
            }

            return Err(AgentError::Provider(format!("API returned {status}: {text}")));
        }

        Err(last_error
            .unwrap_or_else(|| AgentError::Provider("chat request failed after retries".into())))
    }
}

fn is_transient_error(status: reqwest::StatusCode) -> bool {
    status.as_u16() == 429 || status.is_server_error()
}

//! OpenRouter (OpenAI-compatible) chat completions client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DetectError, DetectResult};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client for any OpenAI-compatible chat completions endpoint.
pub struct OpenRouterClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: Client::new(),
        }
    }

    /// Send one prompt+payload pair and return the raw response text.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        payload: &str,
    ) -> DetectResult<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a helpful assistant that outputs strict JSON.".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{prompt}\n\nDATA:\n{payload}"),
                },
            ],
        };

        debug!(model, base_url = %self.base_url, "calling OpenRouter");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DetectError::provider_failed(
                model,
                format!("HTTP {status}: {}", body.chars().take(300).collect::<String>()),
            ));
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DetectError::provider_failed(model, "empty response"))?;

        Ok(text)
    }
}

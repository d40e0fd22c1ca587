// lib/src/reasoning/chat_completion.rs
// Backup reasoning service: any OpenAI-compatible chat completions endpoint
// (NVIDIA's hosted Llama by default).

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use models::ReasoningResult;

use super::response::parse_embedded_reasoning;
use super::ReasoningStrategy;
use crate::config::BackupReasoningConfig;
use crate::errors::{AssessmentError, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatCompletionStrategy {
    client: Client,
    config: BackupReasoningConfig,
}

impl ChatCompletionStrategy {
    pub fn new(client: Client, config: &BackupReasoningConfig) -> Self {
        ChatCompletionStrategy {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ReasoningStrategy for ChatCompletionStrategy {
    fn name(&self) -> &'static str {
        "chat-completion"
    }

    fn is_available(&self) -> bool {
        self.config.has_usable_key()
    }

    async fn attempt(&self, prompt: &str) -> Result<ReasoningResult> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AssessmentError::ConfigurationError("backup API key is not configured".to_string())
        })?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        debug!("Calling chat completions model {}", self.config.model);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssessmentError::ReasoningError(format!(
                "chat completions returned {}: {}",
                status, body
            )));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AssessmentError::MalformedResponse("no choices in chat reply".to_string())
            })?;
        parse_embedded_reasoning(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_once() {
        let mut config = BackupReasoningConfig::default();
        config.base_url = "https://integrate.api.nvidia.com/".to_string();
        let strategy = ChatCompletionStrategy::new(Client::new(), &config);
        assert_eq!(
            strategy.endpoint(),
            "https://integrate.api.nvidia.com/v1/chat/completions"
        );
    }

    #[test]
    fn placeholder_key_is_unavailable() {
        let mut config = BackupReasoningConfig::default();
        config.api_key = Some("nvapi-xxxx".to_string());
        assert!(!ChatCompletionStrategy::new(Client::new(), &config).is_available());
    }
}

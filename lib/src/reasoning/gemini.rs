// lib/src/reasoning/gemini.rs
// Primary reasoning service: Google Gemini `generateContent`.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use models::ReasoningResult;

use super::response::parse_reasoning;
use super::ReasoningStrategy;
use crate::config::PrimaryReasoningConfig;
use crate::errors::{AssessmentError, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// One entry of the `models` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == "generateContent")
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

pub struct GeminiStrategy {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiStrategy {
    pub fn new(client: Client, config: &PrimaryReasoningConfig) -> Self {
        let api_key = if config.has_usable_key() {
            config.api_key.clone()
        } else {
            None
        };
        GeminiStrategy {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AssessmentError::ConfigurationError("Gemini API key is not configured".to_string())
        })
    }

    /// Lists the models visible to the configured key that can serve
    /// `generateContent`.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.key()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssessmentError::ReasoningError(format!(
                "Gemini model listing failed with {}: {}",
                status, body
            )));
        }

        let listing: ListModelsResponse = response.json().await?;
        let usable: Vec<ModelInfo> = listing
            .models
            .into_iter()
            .filter(ModelInfo::supports_generate_content)
            .collect();
        info!("Gemini lists {} generateContent models", usable.len());
        Ok(usable)
    }
}

#[async_trait]
impl ReasoningStrategy for GeminiStrategy {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn attempt(&self, prompt: &str) -> Result<ReasoningResult> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        debug!("Calling Gemini model {}", self.model);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.key()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssessmentError::ReasoningError(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AssessmentError::MalformedResponse(
                "Gemini reply had no text candidates".to_string(),
            ));
        }
        parse_reasoning(&text)
    }
}

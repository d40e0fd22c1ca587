// lib/src/reasoning/mod.rs
// Clinical reasoning: an ordered chain of external services tried one after
// another, ending in a static answer so the pipeline never fails here.

pub mod chat_completion;
pub mod fallback;
pub mod gemini;
pub mod prompt;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use tokio::time::timeout;

use models::{HealthInput, ReasoningResult, RiskStatistics};

use crate::config::ReasoningConfig;
use crate::errors::Result;
pub use chat_completion::ChatCompletionStrategy;
pub use fallback::StaticFallback;
pub use gemini::{GeminiStrategy, ModelInfo};
pub use prompt::build_prompt;

/// One external reasoning service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReasoningStrategy: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;
    /// False when the service is not configured and should be skipped.
    fn is_available(&self) -> bool;
    async fn attempt(&self, prompt: &str) -> Result<ReasoningResult>;
}

/// Builds the HTTP client shared by the hosted strategies.
pub fn http_client(config: &ReasoningConfig) -> Result<Client> {
    Ok(Client::builder().timeout(config.call_timeout()).build()?)
}

pub struct ClinicalReasoningProvider {
    strategies: Vec<Arc<dyn ReasoningStrategy>>,
    call_timeout: Duration,
    fallback: StaticFallback,
}

impl ClinicalReasoningProvider {
    pub fn new(strategies: Vec<Arc<dyn ReasoningStrategy>>, call_timeout: Duration) -> Self {
        ClinicalReasoningProvider {
            strategies,
            call_timeout,
            fallback: StaticFallback,
        }
    }

    /// Gemini first, then the chat completions backup.
    pub fn from_config(config: &ReasoningConfig) -> Result<Self> {
        let client = http_client(config)?;
        let strategies: Vec<Arc<dyn ReasoningStrategy>> = vec![
            Arc::new(GeminiStrategy::new(client.clone(), &config.primary)),
            Arc::new(ChatCompletionStrategy::new(client, &config.backup)),
        ];
        for strategy in &strategies {
            if !strategy.is_available() {
                warn!(
                    "Reasoning service '{}' has no usable API key and will be skipped",
                    strategy.name()
                );
            }
        }
        Ok(Self::new(strategies, config.call_timeout()))
    }

    pub async fn reason(&self, input: &HealthInput, stats: &RiskStatistics) -> ReasoningResult {
        let prompt = build_prompt(input, stats);
        self.reason_with_prompt(&prompt).await
    }

    /// Tries each available strategy in order and returns the first
    /// well-formed answer, or the static fallback when all of them fail.
    pub async fn reason_with_prompt(&self, prompt: &str) -> ReasoningResult {
        for strategy in self.strategies.iter().filter(|s| s.is_available()) {
            match timeout(self.call_timeout, strategy.attempt(prompt)).await {
                Ok(Ok(result)) => {
                    info!("Reasoning answered by '{}'", strategy.name());
                    return result;
                }
                Ok(Err(e)) => warn!("Reasoning service '{}' failed: {}", strategy.name(), e),
                Err(_) => warn!(
                    "Reasoning service '{}' timed out after {:?}",
                    strategy.name(),
                    self.call_timeout
                ),
            }
        }
        warn!("No reasoning service produced an answer; using the static fallback");
        self.fallback.result()
    }
}

// server/src/cli/handlers.rs

// Handlers for the CLI subcommands. Each loads what it needs from the
// application configuration and returns data for `cli.rs` to print.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::info;
use tokio::sync::oneshot;

use cardioguard_lib::config::AppConfig;
use cardioguard_lib::reasoning::{GeminiStrategy, ModelInfo, ReasoningStrategy, http_client};
use cardioguard_lib::{ClinicalReasoningProvider, RiskAssessmentOrchestrator, open_storage};
use models::{AssessmentResult, HealthInput, HealthRecord};

/// Reads a `HealthInput` from a JSON file in the web-form shape.
pub async fn read_health_input(path: &Path) -> Result<HealthInput> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid health input", path.display()))
}

pub async fn handle_serve(mut config: AppConfig, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    info!("Serving CardioGuard API on {}:{}", config.server.host, config.server.port);

    // Held for the server's lifetime; Ctrl-C is the only way out.
    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    rest_api::start_server(config, shutdown_rx).await
}

pub async fn handle_assess(config: &AppConfig, file: &Path, user: &str) -> Result<AssessmentResult> {
    let input = read_health_input(file).await?;
    let storage = open_storage(&config.storage).context("Failed to open storage")?;
    let reasoning = ClinicalReasoningProvider::from_config(&config.reasoning)
        .context("Failed to set up reasoning services")?;
    let orchestrator = RiskAssessmentOrchestrator::new(Arc::new(reasoning), storage.records);

    orchestrator
        .assess(user, input)
        .await
        .context("Assessment rejected")
}

pub async fn handle_history(config: &AppConfig, user: &str) -> Result<Vec<HealthRecord>> {
    let storage = open_storage(&config.storage).context("Failed to open storage")?;
    storage
        .records
        .find_by_user(user)
        .await
        .with_context(|| format!("Failed to load history for {}", user))
}

pub async fn handle_list_models(config: &AppConfig) -> Result<Vec<ModelInfo>> {
    let gemini = GeminiStrategy::new(http_client(&config.reasoning)?, &config.reasoning.primary);
    if !gemini.is_available() {
        bail!("No Gemini API key configured; set GEMINI_API_KEY");
    }
    Ok(gemini.list_models().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardioguard_lib::config::StorageEngineType;
    use models::RiskLevel;
    use std::io::Write;

    fn sled_config(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.engine = StorageEngineType::Sled;
        config.storage.data_directory = dir.join("db");
        config
    }

    fn input_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const HEALTHY: &str = r#"{
        "age": 25, "gender": "Female", "weight": 60, "height": 165,
        "systolicBP": 110, "diastolicBP": 70, "heartRate": 65,
        "cholesterol": 160, "bloodSugar": 85, "activityLevel": "high"
    }"#;

    #[tokio::test]
    async fn assess_then_history_round_trip_through_sled() {
        let dir = tempfile::tempdir().unwrap();
        let config = sled_config(dir.path());
        let file = input_file(HEALTHY);

        // No API keys configured, so the static fallback answers.
        let result = handle_assess(&config, file.path(), "cli-user").await.unwrap();
        assert_eq!(result.final_status, RiskLevel::Medium);
        assert!(result.persisted);

        let history = handle_history(&config, "cli-user").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].risk_score, 0.0);
    }

    #[tokio::test]
    async fn invalid_file_is_reported() {
        let file = input_file("{\"age\": 25}");
        let err = read_health_input(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("not a valid health input"));

        let missing = read_health_input(Path::new("/no/such/file.json")).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn list_models_needs_a_key() {
        let err = handle_list_models(&AppConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}

// lib/tests/reasoning_http.rs
// The hosted reasoning strategies against local stand-ins for the real APIs.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use cardioguard_lib::config::{BackupReasoningConfig, PrimaryReasoningConfig, ReasoningConfig};
use cardioguard_lib::reasoning::{
    http_client, ChatCompletionStrategy, ClinicalReasoningProvider, GeminiStrategy,
    ReasoningStrategy, StaticFallback,
};
use models::RiskLevel;

const GEMINI_KEY: &str = "gemini-test-key";
const BACKUP_KEY: &str = "nvapi-test-key";

const FENCED_REPLY: &str = "```json\n{\"analysis\":\"Primary says hello\",\"urgency\":\"High\",\"explanation\":\"BP\",\"recommendations\":[\"a\",\"b\",\"c\",\"d\"]}\n```";

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn gemini_router(status: StatusCode) -> Router {
    Router::new()
        .route(
            "/v1beta/models/:call",
            post(move |Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(call, "gemini-2.0-flash:generateContent");
                if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(GEMINI_KEY) {
                    return (StatusCode::FORBIDDEN, Json(json!({"error": "bad key"})));
                }
                assert!(body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap()
                    .contains("CardioGuard AI"));
                if status != StatusCode::OK {
                    return (status, Json(json!({"error": {"message": "quota exceeded"}})));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": FENCED_REPLY}]}}]
                    })),
                )
            }),
        )
        .route(
            "/v1beta/models",
            get(|| async {
                Json(json!({
                    "models": [
                        {"name": "models/gemini-2.0-flash", "displayName": "Gemini 2.0 Flash",
                         "supportedGenerationMethods": ["generateContent", "countTokens"]},
                        {"name": "models/text-embedding-004",
                         "supportedGenerationMethods": ["embedContent"]}
                    ]
                }))
            }),
        )
}

/// A primary that wraps its JSON object in prose instead of code fences.
fn chatty_gemini_router() -> Router {
    Router::new().route(
        "/v1beta/models/:call",
        post(|| async {
            let text = "Sure! Here is the result: {\"analysis\":\"Primary says hello\",\"urgency\":\"Low\",\"explanation\":\"e\",\"recommendations\":[\"a\",\"b\",\"c\"]} Stay safe.";
            Json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
        }),
    )
}

fn chat_router(status: StatusCode) -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| async move {
            let expected = format!("Bearer {}", BACKUP_KEY);
            assert_eq!(
                headers.get("authorization").and_then(|v| v.to_str().ok()),
                Some(expected.as_str())
            );
            assert_eq!(body["model"], json!("meta/llama-3.1-70b-instruct"));
            assert_eq!(body["max_tokens"], json!(1024));
            if status != StatusCode::OK {
                return (status, Json(json!({"detail": "unavailable"})));
            }
            let content = "Here is the assessment: {\"analysis\":\"Backup says hello\",\"urgency\":\"moderate\",\"explanation\":\"e\",\"recommendations\":[\"1\",\"2\",\"3\"]} Hope it helps.";
            (
                StatusCode::OK,
                Json(json!({"choices": [{"message": {"role": "assistant", "content": content}}]})),
            )
        }),
    )
}

fn reasoning_config(gemini_base: &str, backup_base: &str) -> ReasoningConfig {
    ReasoningConfig {
        call_timeout_secs: 5,
        primary: PrimaryReasoningConfig {
            api_key: Some(GEMINI_KEY.to_string()),
            base_url: gemini_base.to_string(),
            ..PrimaryReasoningConfig::default()
        },
        backup: BackupReasoningConfig {
            api_key: Some(BACKUP_KEY.to_string()),
            base_url: backup_base.to_string(),
            ..BackupReasoningConfig::default()
        },
    }
}

#[tokio::test]
async fn gemini_reply_is_unfenced_and_truncated() {
    let gemini = spawn(gemini_router(StatusCode::OK)).await;
    let config = reasoning_config(&gemini, "http://127.0.0.1:9");
    let strategy = GeminiStrategy::new(http_client(&config).unwrap(), &config.primary);

    let result = strategy.attempt("You are CardioGuard AI").await.unwrap();
    assert_eq!(result.analysis, "Primary says hello");
    assert_eq!(result.urgency, Some(RiskLevel::High));
    assert_eq!(result.recommendations, ["a", "b", "c"].map(String::from));
}

#[tokio::test]
async fn rate_limited_primary_falls_back_to_chat_completions() {
    let gemini = spawn(gemini_router(StatusCode::TOO_MANY_REQUESTS)).await;
    let backup = spawn(chat_router(StatusCode::OK)).await;
    let provider = ClinicalReasoningProvider::from_config(&reasoning_config(&gemini, &backup)).unwrap();

    let result = provider.reason_with_prompt("You are CardioGuard AI").await;
    assert_eq!(result.analysis, "Backup says hello");
    assert_eq!(result.urgency, Some(RiskLevel::Medium));
}

#[tokio::test]
async fn prose_wrapped_primary_reply_falls_back_to_chat_completions() {
    let gemini = spawn(chatty_gemini_router()).await;
    let backup = spawn(chat_router(StatusCode::OK)).await;
    let config = reasoning_config(&gemini, &backup);

    let strategy = GeminiStrategy::new(http_client(&config).unwrap(), &config.primary);
    assert!(strategy.attempt("You are CardioGuard AI").await.is_err());

    let provider = ClinicalReasoningProvider::from_config(&config).unwrap();
    let result = provider.reason_with_prompt("You are CardioGuard AI").await;
    assert_eq!(result.analysis, "Backup says hello");
}

#[tokio::test]
async fn both_services_failing_returns_the_static_fallback() {
    let gemini = spawn(gemini_router(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let backup = spawn(chat_router(StatusCode::SERVICE_UNAVAILABLE)).await;
    let provider = ClinicalReasoningProvider::from_config(&reasoning_config(&gemini, &backup)).unwrap();

    let result = provider.reason_with_prompt("You are CardioGuard AI").await;
    assert_eq!(result, StaticFallback.result());
}

#[tokio::test]
async fn unreachable_services_return_the_static_fallback() {
    let mut config = reasoning_config("http://127.0.0.1:9", "http://127.0.0.1:9");
    config.call_timeout_secs = 1;
    let provider = ClinicalReasoningProvider::from_config(&config).unwrap();
    let result = provider.reason_with_prompt("prompt").await;
    assert_eq!(result, StaticFallback.result());
}

#[tokio::test]
async fn slow_primary_is_cut_off_by_the_call_timeout() {
    let slow = Router::new().route(
        "/v1beta/models/:call",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            StatusCode::OK
        }),
    );
    let gemini = spawn(slow).await;
    let backup = spawn(chat_router(StatusCode::OK)).await;
    let mut config = reasoning_config(&gemini, &backup);
    config.call_timeout_secs = 1;

    let provider = Arc::new(ClinicalReasoningProvider::from_config(&config).unwrap());
    let started = std::time::Instant::now();
    let result = provider.reason_with_prompt("You are CardioGuard AI").await;
    assert_eq!(result.analysis, "Backup says hello");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn list_models_keeps_only_generate_content_models() {
    let gemini = spawn(gemini_router(StatusCode::OK)).await;
    let config = reasoning_config(&gemini, "http://127.0.0.1:9");
    let strategy = GeminiStrategy::new(http_client(&config).unwrap(), &config.primary);

    let models = strategy.list_models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "models/gemini-2.0-flash");
    assert_eq!(models[0].display_name.as_deref(), Some("Gemini 2.0 Flash"));
}

#[tokio::test]
async fn chat_strategy_reads_first_choice() {
    let backup = spawn(chat_router(StatusCode::OK)).await;
    let config = reasoning_config("http://127.0.0.1:9", &backup);
    let strategy = ChatCompletionStrategy::new(http_client(&config).unwrap(), &config.backup);
    assert!(strategy.is_available());
    let result = strategy.attempt("prompt").await.unwrap();
    assert_eq!(result.recommendations[0], "1");
}

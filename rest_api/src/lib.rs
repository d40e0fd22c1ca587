// rest_api/src/lib.rs
// HTTP surface for CardioGuard: accounts, assessments and history.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error as AnyhowError};
use axum::{
    Json, Router,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{error, info};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use cardioguard_lib::config::AppConfig;
use cardioguard_lib::{
    ClinicalReasoningProvider, RiskAssessmentOrchestrator, UserStorageEngine, open_storage,
};
use security::{AuthError, JwtSettings};

pub mod auth;
pub mod handlers;

pub const NO_TOKEN_MESSAGE: &str = "Not authorized, no token";
pub const TOKEN_FAILED_MESSAGE: &str = "Not authorized, token failed";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction Engine Failed";
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("Prediction failed")]
    PredictionFailed,
    #[error("Internal error: {0}")]
    Internal(String),
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RestApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            RestApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            RestApiError::Auth(AuthError::UserExists) => {
                (StatusCode::BAD_REQUEST, AuthError::UserExists.to_string())
            }
            RestApiError::Auth(AuthError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            RestApiError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials.to_string(),
            ),
            RestApiError::Auth(AuthError::UnknownUser | AuthError::JwtError(_)) => {
                (StatusCode::UNAUTHORIZED, TOKEN_FAILED_MESSAGE.to_string())
            }
            RestApiError::Auth(e) => {
                error!("Authentication backend failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
            RestApiError::PredictionFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                PREDICTION_FAILED_MESSAGE.to_string(),
            ),
            RestApiError::Internal(e) => {
                error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RiskAssessmentOrchestrator>,
    pub users: Arc<dyn UserStorageEngine>,
    pub jwt: Arc<JwtSettings>,
}

impl AppState {
    pub fn new(
        orchestrator: Arc<RiskAssessmentOrchestrator>,
        users: Arc<dyn UserStorageEngine>,
        jwt: JwtSettings,
    ) -> Self {
        AppState {
            orchestrator,
            users,
            jwt: Arc::new(jwt),
        }
    }

    /// Wires storage, reasoning and auth from the loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnyhowError> {
        let storage = open_storage(&config.storage).context("Failed to open storage")?;
        let reasoning = ClinicalReasoningProvider::from_config(&config.reasoning)
            .context("Failed to set up reasoning services")?;
        let orchestrator = RiskAssessmentOrchestrator::new(Arc::new(reasoning), storage.records);
        Ok(Self::new(
            Arc::new(orchestrator),
            storage.users,
            JwtSettings::from_config(&config.security),
        ))
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/users/register", post(handlers::register))
        .route("/api/users/login", post(handlers::login))
        .route("/api/predict", post(handlers::predict))
        .route("/api/predict/history", get(handlers::history))
        .with_state(state)
        .layer(cors)
}

// Main function to start the REST API server
pub async fn start_server(
    config: AppConfig,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    info!("CardioGuard API listening on http://{}", addr);

    let shutdown_signal = async {
        tokio::select! {
            _ = shutdown_rx => {
                info!("Received external shutdown signal.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down.");
            }
        }
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("REST API server failed to start or run")?;

    info!("REST API server stopped.");
    Ok(())
}

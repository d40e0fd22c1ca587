// rest_api/src/handlers.rs
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::error;
use serde::Serialize;
use serde_json::{Value, json};

use cardioguard_lib::AssessmentError;
use models::{AssessmentResult, HealthInput, HealthRecord, Login, NewUser};
use security::{AuthSession, login_user, register_user};

use crate::auth::AuthenticatedUser;
use crate::{AppState, RestApiError};

/// Body returned by register and login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        SessionResponse {
            id: session.user.id,
            name: session.user.name,
            email: session.user.email,
            token: session.token,
        }
    }
}

fn bad_json(rejection: JsonRejection) -> RestApiError {
    RestApiError::BadRequest(rejection.body_text())
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "message": "CardioGuard API is healthy",
        "status": "ok"
    }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, RestApiError> {
    let Json(registration) = payload.map_err(bad_json)?;
    let session = register_user(registration, state.users.as_ref(), &state.jwt).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Login>, JsonRejection>,
) -> Result<Json<SessionResponse>, RestApiError> {
    let Json(credentials) = payload.map_err(bad_json)?;
    let session = login_user(credentials, state.users.as_ref(), &state.jwt).await?;
    Ok(Json(SessionResponse::from(session)))
}

pub async fn predict(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<HealthInput>, JsonRejection>,
) -> Result<Json<AssessmentResult>, RestApiError> {
    let Json(input) = payload.map_err(bad_json)?;
    match state.orchestrator.assess(&user.id, input).await {
        Ok(result) => Ok(Json(result)),
        Err(AssessmentError::Validation(e)) => Err(RestApiError::BadRequest(e.to_string())),
        Err(e) => {
            error!("Prediction failed for user {}: {}", user.id, e);
            Err(RestApiError::PredictionFailed)
        }
    }
}

pub async fn history(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<HealthRecord>>, RestApiError> {
    state
        .orchestrator
        .history(&user.id)
        .await
        .map(Json)
        .map_err(|e| RestApiError::Internal(format!("history for {}: {}", user.id, e)))
}

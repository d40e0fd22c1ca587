// rest_api/src/auth.rs
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use log::warn;

use models::User;
use security::{AuthError, authenticate_token};

use crate::{AppState, NO_TOKEN_MESSAGE, RestApiError, TOKEN_FAILED_MESSAGE};

/// The user behind a valid `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = RestApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(RestApiError::Unauthorized(NO_TOKEN_MESSAGE))?;

        match authenticate_token(token, state.users.as_ref(), &state.jwt).await {
            Ok(user) => Ok(AuthenticatedUser(user)),
            Err(AuthError::InternalError(e)) => Err(RestApiError::Internal(e)),
            Err(e) => {
                warn!("Rejected bearer token: {}", e);
                Err(RestApiError::Unauthorized(TOKEN_FAILED_MESSAGE))
            }
        }
    }
}

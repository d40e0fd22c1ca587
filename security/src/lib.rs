// security/src/lib.rs
use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::{info, warn};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use cardioguard_lib::AssessmentError;
use cardioguard_lib::config::SecurityConfig;
use cardioguard_lib::storage_engine::UserStorageEngine;
use models::{Login, NewUser, User};

/// Claims for JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub exp: u64,    // Expiration time
    pub iat: u64,    // Issued at
}

/// Custom authentication errors.
#[derive(Debug)]
pub enum AuthError {
    UserExists,
    InvalidCredentials,
    UnknownUser,
    Validation(String),
    InternalError(String),
    JwtError(String),
    PasswordHashError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthError::UserExists => write!(f, "User already exists"),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::UnknownUser => write!(f, "Token subject no longer exists"),
            AuthError::Validation(msg) => write!(f, "{}", msg),
            AuthError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
            AuthError::JwtError(msg) => write!(f, "JWT error: {}", msg),
            AuthError::PasswordHashError(msg) => write!(f, "Password hashing error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AssessmentError> for AuthError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::AlreadyExists(_) => AuthError::UserExists,
            other => AuthError::InternalError(other.to_string()),
        }
    }
}

/// Signing secret and token lifetime.
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    ttl: Duration,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        JwtSettings {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        if config.uses_default_secret() {
            warn!("JWT secret is the built-in default; set JWT_SECRET before deploying");
        }
        Self::new(config.jwt_secret.clone(), Duration::hours(config.token_ttl_hours))
    }
}

/// A signed-in user and their bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Hashes a password using Argon2.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHashError(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against an Argon2 hash.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AuthError> {
    let password_hash = PasswordHash::new(hashed_password)
        .map_err(|e| AuthError::PasswordHashError(format!("Failed to parse password hash: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &password_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHashError(format!(
            "Failed to verify password: {}",
            e
        ))),
    }
}

/// Generates a JWT token whose subject is the user id.
pub fn generate_jwt_token(user_id: &str, settings: &JwtSettings) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + settings.ttl).timestamp().max(0) as u64,
        iat: now.timestamp().max(0) as u64,
    };

    let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::JwtError(format!("Failed to encode JWT: {}", e)))
}

/// Decodes and validates a JWT token.
pub fn validate_jwt_token(token: &str, settings: &JwtSettings) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::JwtError(format!("Failed to decode or validate JWT: {}", e)))
}

/// Registers a new user and signs them in.
pub async fn register_user(
    registration: NewUser,
    users: &dyn UserStorageEngine,
    settings: &JwtSettings,
) -> Result<AuthSession, AuthError> {
    registration
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    // Early check; add_user still rejects a concurrent duplicate.
    if users.get_user_by_email(&registration.email).await?.is_some() {
        return Err(AuthError::UserExists);
    }

    let password_hash = hash_password(&registration.password)?;
    let user = User::from_new_user(registration, password_hash);
    users.add_user(&user).await?;
    info!("Registered user {}", user.id);

    let token = generate_jwt_token(&user.id, settings)?;
    Ok(AuthSession { user, token })
}

/// Logs in a user. Returns a session with a fresh token on success.
pub async fn login_user(
    login: Login,
    users: &dyn UserStorageEngine,
    settings: &JwtSettings,
) -> Result<AuthSession, AuthError> {
    let user = users
        .get_user_by_email(&login.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?; // User not found

    if !verify_password(&login.password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }
    let token = generate_jwt_token(&user.id, settings)?;
    Ok(AuthSession { user, token })
}

/// Resolves a bearer token to the user it was issued for.
pub async fn authenticate_token(
    token: &str,
    users: &dyn UserStorageEngine,
    settings: &JwtSettings,
) -> Result<User, AuthError> {
    let claims = validate_jwt_token(token, settings)?;
    users
        .get_user_by_id(&claims.sub)
        .await?
        .ok_or(AuthError::UnknownUser)
}

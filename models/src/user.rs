// models/src/user.rs
// Account types. Password hashing lives in the security crate; the stored
// `User` only ever carries the hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ValidationError, ValidationResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

// --- DTO for New User Registration ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String, // Plaintext, hashed before storage
}

impl NewUser {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty("name"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(ValidationError::InvalidEmail(self.email.clone())),
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }
        Ok(())
    }
}

// --- Stored User Struct ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a stored user from a registration and an already-computed hash.
    pub fn from_new_user(new_user: NewUser, password_hash: String) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name.trim().to_string(),
            email: normalize_email(&new_user.email),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Emails are compared case-insensitively everywhere.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

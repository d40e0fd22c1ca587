// lib/src/config/config_structs.rs

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config_defaults::*;
use crate::errors::AssessmentError;

/// Defines the available storage engine types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageEngineType {
    Sled,
    #[serde(alias = "in_memory", alias = "memory")]
    InMemory,
}

impl FromStr for StorageEngineType {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sled" => Ok(StorageEngineType::Sled),
            "inmemory" | "in_memory" | "memory" => Ok(StorageEngineType::InMemory),
            _ => Err(AssessmentError::ConfigurationError(format!(
                "Unsupported storage engine type: {}. Available: sled, inmemory",
                s
            ))),
        }
    }
}

impl fmt::Display for StorageEngineType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageEngineType::Sled => write!(f, "sled"),
            StorageEngineType::InMemory => write!(f, "inmemory"),
        }
    }
}

/// Represents the `[server]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Represents the `[storage]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_engine_type")]
    pub engine: StorageEngineType,
    /// Where the sled database lives; ignored by the in-memory engine.
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            engine: default_storage_engine_type(),
            data_directory: default_data_directory(),
        }
    }
}

/// Primary reasoning service (Gemini `generateContent`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrimaryReasoningConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_primary_model")]
    pub model: String,
    #[serde(default = "default_primary_base_url")]
    pub base_url: String,
}

impl Default for PrimaryReasoningConfig {
    fn default() -> Self {
        PrimaryReasoningConfig {
            api_key: None,
            model: default_primary_model(),
            base_url: default_primary_base_url(),
        }
    }
}

impl PrimaryReasoningConfig {
    pub fn has_usable_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }
}

/// Backup reasoning service (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupReasoningConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_backup_model")]
    pub model: String,
    #[serde(default = "default_backup_base_url")]
    pub base_url: String,
    #[serde(default = "default_backup_temperature")]
    pub temperature: f32,
    #[serde(default = "default_backup_top_p")]
    pub top_p: f32,
    #[serde(default = "default_backup_max_tokens")]
    pub max_tokens: u32,
}

impl Default for BackupReasoningConfig {
    fn default() -> Self {
        BackupReasoningConfig {
            api_key: None,
            model: default_backup_model(),
            base_url: default_backup_base_url(),
            temperature: default_backup_temperature(),
            top_p: default_backup_top_p(),
            max_tokens: default_backup_max_tokens(),
        }
    }
}

impl BackupReasoningConfig {
    /// A key that is blank or still the shipped placeholder counts as unset.
    pub fn has_usable_key(&self) -> bool {
        self.api_key.as_deref().map_or(false, |key| {
            let key = key.trim();
            !key.is_empty() && !key.starts_with(PLACEHOLDER_KEY_PREFIX)
        })
    }
}

/// Represents the `[reasoning]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReasoningConfig {
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    #[serde(default)]
    pub primary: PrimaryReasoningConfig,
    #[serde(default)]
    pub backup: BackupReasoningConfig,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        ReasoningConfig {
            call_timeout_secs: default_call_timeout_secs(),
            primary: PrimaryReasoningConfig::default(),
            backup: BackupReasoningConfig::default(),
        }
    }
}

impl ReasoningConfig {
    pub fn call_timeout(&self) -> Duration {
        // A zero timeout would fail every call before it starts.
        Duration::from_secs(self.call_timeout_secs.max(1))
    }
}

/// Represents the `[security]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        SecurityConfig {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

impl SecurityConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Represents the entire configuration tree.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

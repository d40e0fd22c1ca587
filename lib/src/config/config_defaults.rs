// lib/src/config/config_defaults.rs
// Default values for every configuration key, used as serde defaults so a
// missing file or section still yields a runnable configuration.

use std::path::PathBuf;

use super::config_structs::StorageEngineType;

pub const DEFAULT_CONFIG_FILE_STEM: &str = "cardioguard";
pub const ENV_PREFIX: &str = "CARDIOGUARD";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIRECTORY: &str = "./data/cardioguard";

pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_PRIMARY_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BACKUP_MODEL: &str = "meta/llama-3.1-70b-instruct";
pub const DEFAULT_BACKUP_BASE_URL: &str = "https://integrate.api.nvidia.com";
pub const DEFAULT_BACKUP_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_BACKUP_TOP_P: f32 = 0.7;
pub const DEFAULT_BACKUP_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 20;
/// Keys starting with this prefix are the sample value shipped in `.env.example`.
pub const PLACEHOLDER_KEY_PREFIX: &str = "nvapi-xxxx";

pub const DEFAULT_JWT_SECRET: &str = "cardioguard-development-secret-change-me";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 30;

pub fn default_host() -> String { DEFAULT_HOST.to_string() }
pub fn default_port() -> u16 { DEFAULT_PORT }
pub fn default_storage_engine_type() -> StorageEngineType { StorageEngineType::Sled }
pub fn default_data_directory() -> PathBuf { PathBuf::from(DEFAULT_DATA_DIRECTORY) }
pub fn default_call_timeout_secs() -> u64 { DEFAULT_CALL_TIMEOUT_SECS }
pub fn default_primary_model() -> String { DEFAULT_PRIMARY_MODEL.to_string() }
pub fn default_primary_base_url() -> String { DEFAULT_PRIMARY_BASE_URL.to_string() }
pub fn default_backup_model() -> String { DEFAULT_BACKUP_MODEL.to_string() }
pub fn default_backup_base_url() -> String { DEFAULT_BACKUP_BASE_URL.to_string() }
pub fn default_backup_temperature() -> f32 { DEFAULT_BACKUP_TEMPERATURE }
pub fn default_backup_top_p() -> f32 { DEFAULT_BACKUP_TOP_P }
pub fn default_backup_max_tokens() -> u32 { DEFAULT_BACKUP_MAX_TOKENS }
pub fn default_jwt_secret() -> String { DEFAULT_JWT_SECRET.to_string() }
pub fn default_token_ttl_hours() -> i64 { DEFAULT_TOKEN_TTL_HOURS }

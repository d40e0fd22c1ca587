// lib/src/config/mod.rs
// Layered configuration: serde defaults, then an optional config file, then
// `CARDIOGUARD__SECTION__KEY` environment variables, then the bare variable
// names the deployment scripts already export.

pub mod config_defaults;
pub mod config_structs;

use std::env;
use std::path::Path;

use config::{Config, Environment, File};
use log::{debug, info};

use crate::errors::Result;
pub use config_defaults::*;
pub use config_structs::{
    AppConfig, BackupReasoningConfig, PrimaryReasoningConfig, ReasoningConfig, SecurityConfig,
    ServerConfig, StorageConfig, StorageEngineType,
};

/// Loads the application configuration.
///
/// With `config_file` set the file must exist; otherwise `cardioguard.{toml,yaml,json}`
/// in the working directory is used when present.
pub fn load_app_config(config_file: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    builder = match config_file {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE_STEM).required(false)),
    };

    builder = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .set_override_option("reasoning.primary.api_key", env::var("GEMINI_API_KEY").ok())?
        .set_override_option("reasoning.backup.api_key", env::var("NVIDIA_API_KEY").ok())?
        .set_override_option("security.jwt_secret", env::var("JWT_SECRET").ok())?
        .set_override_option("server.port", env::var("PORT").ok())?;

    let config: AppConfig = builder.build()?.try_deserialize()?;
    debug!(
        "Configuration loaded: server {}:{}, storage {}, primary model {}, backup model {}",
        config.server.host,
        config.server.port,
        config.storage.engine,
        config.reasoning.primary.model,
        config.reasoning.backup.model
    );
    Ok(config)
}

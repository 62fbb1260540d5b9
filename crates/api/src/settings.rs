//! Layered Application Configuration
//!
//! Defaults, then an optional TOML file, then `HEALTH_ASSISTANT__*`
//! environment variables (`__` separates nesting levels).

use crate::rate_limit::RateLimitConfig;
use crate::ApiError;
use fallback::GeminiConfig;
use matcher::MatcherConfig;
use reference_index::ColumnSchema;
use serde::{Deserialize, Serialize};

/// Config file read when `HEALTH_ASSISTANT_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "health-assistant.toml";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "HEALTH_ASSISTANT_CONFIG";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "HEALTH_ASSISTANT";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// Expose Prometheus metrics on `/metrics`
    pub metrics_enabled: bool,
    /// Per-IP limit on `/message`
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            metrics_enabled: true,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Reference data source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// CSV file with one row per disease
    pub csv_path: String,
    /// Column layout of the CSV file
    pub columns: ColumnSchema,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            csv_path: "Dataset/disease2.csv".to_string(),
            columns: ColumnSchema::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub reference: ReferenceConfig,
    pub assistant: MatcherConfig,
    pub completion: GeminiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from the default (or `HEALTH_ASSISTANT_CONFIG`) file and environment
    pub fn load() -> Result<Self, ApiError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from an optional file plus environment overrides
    pub fn load_from(path: &str) -> Result<Self, ApiError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: &str, env_prefix: &str) -> Result<Self, ApiError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

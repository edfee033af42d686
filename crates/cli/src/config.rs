//! Application Configuration

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use feature_engine::CorpusConfig;
use serde::{Deserialize, Serialize};

/// Default config file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "cipherprint.toml";

/// Environment variable prefix, e.g. `CIPHERPRINT__LOG__LEVEL=debug`
pub const ENV_PREFIX: &str = "CIPHERPRINT";

/// Output encoding for feature rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Header line, then comma-separated rows
    Csv,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON log lines instead of plain text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Batching of classification requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Requests per batch
    pub batch_size: usize,
    /// Wait after the first request of a batch (ms)
    pub batch_timeout_ms: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            batch_size: 16,
            batch_timeout_ms: 5,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: LogConfig,
    pub corpus: CorpusConfig,
    pub inference: InferenceConfig,
    pub output: OutputFormat,
}

impl AppConfig {
    /// Layer defaults, the config file and `CIPHERPRINT__*` variables.
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

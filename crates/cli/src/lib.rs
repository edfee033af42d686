//! Cipherprint Command-line Front End
//!
//! Wires configuration and logging around the feature and inference engines.

pub mod commands;
pub mod config;

pub use config::{AppConfig, InferenceConfig, LogConfig, OutputFormat};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging to stderr so stdout carries only command output
pub fn init_logging(config: &LogConfig) {
    let level = config.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.expect("Failed to set tracing subscriber");
}

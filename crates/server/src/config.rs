//! # Application Configuration
//!
//! Configuration for the `sqlgenius-server`, loaded from an optional
//! `config.yml` next to the crate plus environment variables. The YAML file
//! may reference environment variables with `${VAR}` placeholders, which are
//! substituted before parsing; top-level keys can be overridden directly
//! (`PORT`) and nested keys through `SQLGENIUS_`-prefixed variables
//! (e.g. `SQLGENIUS_PROVIDER__API_KEY`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use sqlgenius::types::ProviderConfig;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// An error from the underlying `config` crate or file I/O.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from the `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The AI provider backing the generation flows.
    pub provider: ProviderConfig,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9002
}

// Reads a file and substitutes `${VAR}` env references in its content.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    if expanded_content.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// Layering, lowest precedence first: programmatic defaults (a local
/// OpenAI-compatible provider), the YAML file, plain environment variables
/// for top-level keys, and `SQLGENIUS_`-prefixed variables for nested keys.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder().set_default("provider.provider", "local")?;

    let config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => format!("{}/config.yml", env!("CARGO_MANIFEST_DIR")),
    };

    if let Some(content) = read_and_substitute(&config_path)? {
        info!("Loading configuration from '{config_path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("SQLGENIUS")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<AppConfig>()?)
}

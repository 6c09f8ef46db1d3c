//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a missing file or a partial file is
//! fine. `PORT` in the environment overrides `server.port`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub wheel: WheelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WheelConfig {
    /// Fixed RNG seed. Leave unset in production.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    /// Environment overrides are applied either way.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            info!(path, "No config file found, using defaults");
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Apply `PORT` from the environment, if set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

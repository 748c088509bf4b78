use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::tailoring::settings::{load_stopwords, TailorConfig};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// TOML tailoring config. Built-in defaults when unset.
    pub tailor_config_path: Option<PathBuf>,
    /// YAML stopword groups. Replaces the config's stopword list when set.
    pub stopwords_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            tailor_config_path: optional_path("TAILOR_CONFIG_PATH"),
            stopwords_path: optional_path("STOPWORDS_PATH"),
        })
    }

    /// Loads the base tailoring config shared by every request. Paths that
    /// are set must exist.
    pub fn load_tailor_config(&self) -> Result<TailorConfig> {
        let mut tailor_config = match &self.tailor_config_path {
            Some(path) => TailorConfig::load(path)
                .with_context(|| format!("Failed to load tailor config from {}", path.display()))?,
            None => TailorConfig::default(),
        };

        if let Some(path) = &self.stopwords_path {
            let stopwords = load_stopwords(path)
                .with_context(|| format!("Failed to load stopwords from {}", path.display()))?;
            info!(count = stopwords.len(), "Loaded stopwords");
            tailor_config = tailor_config.with_stopwords(stopwords);
        }

        Ok(tailor_config)
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

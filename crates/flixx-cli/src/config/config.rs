//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable holding the TMDB bearer token.
pub const TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// `[tmdb]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Bearer token; `TMDB_API_TOKEN` takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// API base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language.
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: None,
            language: String::from("en-US"),
        }
    }
}

impl TmdbConfig {
    /// Picks the bearer token, preferring `env_token` over the file value.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source provides a token.
    pub fn resolve_api_token(&self, env_token: Option<String>) -> Result<String> {
        let token = env_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.api_token.clone().filter(|t| !t.trim().is_empty()));
        match token {
            Some(t) => Ok(t),
            None => bail!("TMDB API token is required (set {TOKEN_ENV} or tmdb.api_token)"),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

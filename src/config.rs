// src/config.rs
// =============================================================================
// Optional settings file.
//
// Looked up at `--config <PATH>` or, by default, at
// `<config dir>/ui-forge/config.toml` (e.g. ~/.config/ui-forge/config.toml
// on Linux). A missing default file is fine: every field has a default.
//
// Example:
//   model = "gpt-4o-mini"
//   temperature = 0.4
//   output_dir = "generated"
//
//   [preview]
//   enabled = true
//   command = ["python3", "-I"]
// =============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::generate;
use crate::github;
use crate::preview::PreviewConfig;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github_api_url: String,
    /// Falls back to the GITHUB_TOKEN environment variable
    pub github_token: Option<String>,
    pub openai_api_url: String,
    pub model: String,
    pub temperature: f32,
    /// Applies to model calls only; GitHub requests use no timeout
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub preview: PreviewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_url: github::DEFAULT_API_URL.to_string(),
            github_token: None,
            openai_api_url: generate::DEFAULT_API_URL.to_string(),
            model: generate::DEFAULT_MODEL.to_string(),
            temperature: generate::DEFAULT_TEMPERATURE,
            request_timeout_secs: 120,
            output_dir: PathBuf::from("."),
            preview: PreviewConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path` if given (it must exist), else the default location if
    /// it exists, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        if config.github_token.is_none() {
            config.github_token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ui-forge").join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
model = "gpt-4o-mini"

[preview]
enabled = true
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert!(config.preview.enabled);
        assert_eq!(config.preview.command, vec!["python3", "-I"]);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "temperature = \"hot\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}

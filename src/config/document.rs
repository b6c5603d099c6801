//! The `mazer.yml` configuration document.
//!
//! ```yaml
//! server:
//!   url: https://galaxy.ansible.com
//!   ignore_certs: false
//! content_path: ~/.ansible/content
//! global_content_path: /usr/share/ansible/content
//! ```
//!
//! Every field is optional; absent fields take the built-in defaults. A field
//! that is present but `null` or empty stays unset, which the context builder
//! reports as a configuration defect instead of silently substituting a path.

use crate::constants::{DEFAULT_CONTENT_PATH, DEFAULT_GLOBAL_CONTENT_PATH, DEFAULT_SERVER_URL};
use crate::core::MazerError;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tokio::fs;

/// Registry server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the Galaxy API server
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub ignore_certs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            ignore_certs: false,
        }
    }
}

/// Parsed configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Where content is installed by default
    #[serde(default = "default_content_path", deserialize_with = "empty_as_none")]
    pub content_path: Option<String>,

    /// Where content is installed with `install --global`
    #[serde(default = "default_global_content_path", deserialize_with = "empty_as_none")]
    pub global_content_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            content_path: default_content_path(),
            global_content_path: default_global_content_path(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_content_path() -> Option<String> {
    Some(DEFAULT_CONTENT_PATH.to_string())
}

#[allow(clippy::unnecessary_wraps)]
fn default_global_content_path() -> Option<String> {
    Some(DEFAULT_GLOBAL_CONTENT_PATH.to_string())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Config {
    /// Parse a configuration document from YAML text.
    ///
    /// Empty documents (including comment-only files) yield [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns [`MazerError::ConfigParse`] if the YAML is malformed or has the
    /// wrong shape.
    pub fn from_yaml(content: &str, file: &Path) -> Result<Self, MazerError> {
        let parse_error = |e: serde_yaml::Error| MazerError::ConfigParse {
            file: file.display().to_string(),
            reason: e.to_string(),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value).map_err(parse_error)
    }

    /// Load the configuration from `path`.
    ///
    /// A missing file is not an error: the default document is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Ok(Self::from_yaml(&content, path)?)
    }
}

//! Configuration file discovery and loading.
//!
//! # Location Priority
//!
//! 1. `MAZER_CONFIG` environment variable (if set and non-empty)
//! 2. `ANSIBLE_GALAXY_CONFIG` environment variable (legacy)
//! 3. `~/.ansible/mazer.yml`
//!
//! The chosen path is expanded and made absolute before the document is loaded
//! with [`Config::load`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use mazer::config::{Config, resolve_config_path};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let path = resolve_config_path()?;
//! let config = Config::load(&path).await?;
//! println!("content path: {:?}", config.content_path);
//! # Ok(())
//! # }
//! ```

mod document;

pub use document::{Config, ServerConfig};

use crate::constants::{CONFIG_ENV_VARS, DEFAULT_CONFIG_FILE};
use crate::utils::paths::absolute_path;
use anyhow::Result;
use std::path::PathBuf;

/// Look up a config path override, returning the variable that supplied it.
///
/// Variables are consulted in [`CONFIG_ENV_VARS`] order; empty values count
/// as unset. `lookup` abstracts the environment so callers and tests need not
/// mutate process state.
pub fn config_path_from_env<F>(lookup: F) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    CONFIG_ENV_VARS.into_iter().find_map(|var| {
        lookup(var).filter(|value| !value.is_empty()).map(|value| (var, value))
    })
}

/// Resolve the absolute config file path using the given environment lookup.
///
/// # Errors
///
/// Returns an error if the path cannot be made absolute.
pub fn resolve_config_path_with<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match config_path_from_env(lookup) {
        Some((var, value)) => {
            tracing::info!("Using config file '{}' as specified by env var '{}'", value, var);
            value
        }
        None => DEFAULT_CONFIG_FILE.to_string(),
    };

    absolute_path(&raw)
}

/// Resolve the absolute config file path from the process environment.
///
/// # Errors
///
/// Returns an error if the path cannot be made absolute.
pub fn resolve_config_path() -> Result<PathBuf> {
    resolve_config_path_with(|var| std::env::var(var).ok())
}

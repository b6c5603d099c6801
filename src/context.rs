//! Execution contexts built once per invocation.
//!
//! [`build_execution_context`] merges the loaded [`Config`] with the
//! per-invocation [`ContextOverrides`], lowest precedence first:
//!
//! 1. `content_path` from the configuration document
//! 2. `global_content_path` when `--global` was given
//! 3. `--content-path` from the command line
//!
//! Server settings follow the same order: the configured `server` block is the
//! base, `--server` replaces the URL and `--ignore-certs` sets `ignore_certs`.

use crate::config::Config;
use crate::constants::DEFAULT_RELEASES_DIR;
use crate::core::MazerError;
use crate::utils::paths::absolute_path;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Server settings in effect for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub url: String,
    pub ignore_certs: bool,
}

/// Merged server and content-path settings for one invocation.
///
/// Immutable once built; handlers receive it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionContext {
    pub server: ServerSettings,
    /// Absolute, home-expanded content path
    pub content_path: PathBuf,
}

/// The command-line values that can override configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOverrides {
    pub server_url: Option<String>,
    /// Only `Some(true)` when the flag was given; absence keeps the configured value
    pub ignore_certs: Option<bool>,
    pub content_path: Option<String>,
    pub global_install: bool,
}

/// Merge configuration and overrides into an [`ExecutionContext`].
///
/// # Errors
///
/// Returns [`MazerError::ContentPathUnresolved`] when the winning source has no
/// content path, or an error if the path cannot be made absolute.
pub fn build_execution_context(
    overrides: &ContextOverrides,
    config: &Config,
) -> Result<ExecutionContext> {
    let mut raw_content_path = config
        .content_path
        .as_deref()
        .map(|path| (path, "content_path"));

    if overrides.global_install {
        raw_content_path = config
            .global_content_path
            .as_deref()
            .map(|path| (path, "global_content_path"));
        if raw_content_path.is_none() {
            return Err(MazerError::ContentPathUnresolved {
                source_name: "global_content_path".to_string(),
            }
            .into());
        }
    }

    if let Some(path) = overrides.content_path.as_deref().filter(|p| !p.is_empty()) {
        raw_content_path = Some((path, "--content-path"));
    }

    let Some((raw_content_path, source)) = raw_content_path else {
        return Err(MazerError::ContentPathUnresolved {
            source_name: "content_path".to_string(),
        }
        .into());
    };
    tracing::trace!("content path '{}' taken from {}", raw_content_path, source);

    let mut server = ServerSettings {
        url: config.server.url.clone(),
        ignore_certs: config.server.ignore_certs,
    };
    if let Some(url) = overrides.server_url.as_deref().filter(|u| !u.is_empty()) {
        server.url = url.to_string();
    }
    if let Some(ignore_certs) = overrides.ignore_certs {
        server.ignore_certs = ignore_certs;
    }

    Ok(ExecutionContext {
        server,
        content_path: absolute_path(raw_content_path)?,
    })
}

/// Paths used by the `build` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    /// Collection source tree
    pub collection_path: PathBuf,
    /// Directory receiving the archive
    pub output_path: PathBuf,
}

impl BuildContext {
    /// Resolve build paths, defaulting to `cwd` and `<collection_path>/releases`.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied path cannot be made absolute.
    pub fn resolve(
        collection_path: Option<&str>,
        output_path: Option<&str>,
        cwd: &Path,
    ) -> Result<Self> {
        let collection_path = match collection_path {
            Some(path) => absolute_path(path)?,
            None => cwd.to_path_buf(),
        };
        let output_path = match output_path {
            Some(path) => absolute_path(path)?,
            None => collection_path.join(DEFAULT_RELEASES_DIR),
        };

        Ok(Self {
            collection_path,
            output_path,
        })
    }
}

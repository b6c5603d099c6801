//! Content specs, collection metadata, and the installed-content layout.
//!
//! Installed collections live at
//! `<content_path>/ansible_collections/<namespace>/<name>`; each may carry a
//! `galaxy.yml` with its version.

mod spec;

pub use spec::{ContentSpec, SpecSource};

use crate::constants::{COLLECTION_METADATA_FILE, COLLECTIONS_DIR};
use crate::matchers::ContentId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// The subset of `galaxy.yml` Mazer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CollectionMetadata {
    /// Read `galaxy.yml` from a collection directory, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(collection_dir: &Path) -> Result<Option<Self>> {
        let path = collection_dir.join(COLLECTION_METADATA_FILE);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let metadata = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(metadata))
    }
}

/// One installed collection found under a content path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledContent {
    pub id: ContentId,
    pub path: PathBuf,
    pub version: Option<String>,
}

/// Root of the `<namespace>/<name>` tree under a content path.
#[must_use]
pub fn collections_root(content_path: &Path) -> PathBuf {
    content_path.join(COLLECTIONS_DIR)
}

/// Install location of `id` under `content_path`.
#[must_use]
pub fn install_dir(content_path: &Path, id: &ContentId) -> PathBuf {
    collections_root(content_path).join(&id.namespace).join(&id.name)
}

/// Enumerate installed collections, sorted by namespace then name.
///
/// A missing content path simply has nothing installed.
///
/// # Errors
///
/// Returns an error if a directory exists but cannot be read, or a
/// collection's `galaxy.yml` is malformed.
pub async fn installed_content(content_path: &Path) -> Result<Vec<InstalledContent>> {
    let root = collections_root(content_path);
    let mut found = Vec::new();

    for namespace_dir in subdirectories(&root).await? {
        let Some(namespace) = file_name(&namespace_dir) else {
            continue;
        };
        for collection_dir in subdirectories(&namespace_dir).await? {
            let Some(name) = file_name(&collection_dir) else {
                continue;
            };
            let version = CollectionMetadata::load(&collection_dir)
                .await?
                .and_then(|metadata| metadata.version);
            found.push(InstalledContent {
                id: ContentId::new(namespace.clone(), name),
                path: collection_dir,
                version,
            });
        }
    }

    found.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(found)
}

async fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    if !fs::try_exists(dir).await.unwrap_or(false) {
        return Ok(Vec::new());
    }

    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        // follows symlinks so editable installs are listed
        if fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir()) {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

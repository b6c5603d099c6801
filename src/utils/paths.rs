//! Path expansion helpers shared by the config resolver and the context builder.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a tilde prefix are returned unchanged.
#[must_use]
pub fn expand_user(raw: &str) -> PathBuf {
    let home = || dirs::home_dir().and_then(|path| path.to_str().map(str::to_owned));
    PathBuf::from(shellexpand::tilde_with_context(raw, home).into_owned())
}

/// Expand `~`, anchor relative paths at the current directory, and normalize
/// `.` and `..` components.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined for a
/// relative path.
pub fn absolute_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_user(raw);
    let absolute = std::path::absolute(&expanded)
        .with_context(|| format!("Failed to make '{}' absolute", expanded.display()))?;
    Ok(normalize_path(&absolute))
}

/// Lexically normalize a path by dropping `.` and resolving `..` components.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(components.last(), Some(Component::RootDir) | None) {
                    components.pop();
                }
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

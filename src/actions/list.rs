//! `list` and `remove` over the installed-content tree.

use crate::content::{InstalledContent, installed_content};
use crate::context::ExecutionContext;
use crate::matchers::MatchFilter;
use anyhow::{Context, Result};
use colored::Colorize;
use tokio::fs;

pub async fn list(ctx: &ExecutionContext, filter: &MatchFilter) -> Result<()> {
    let installed = installed_content(&ctx.content_path).await?;
    let selected: Vec<&InstalledContent> =
        installed.iter().filter(|item| filter.matches(&item.id)).collect();

    if selected.is_empty() {
        println!("No installed collections found.");
        return Ok(());
    }

    println!("{}", format!("Collections in {}", ctx.content_path.display()).bold());
    for line in format_listing(&selected) {
        println!("{line}");
    }
    println!("{}: {} collections", "Total".green().bold(), selected.len());
    Ok(())
}

/// One `namespace.name version` line per item, versions aligned.
#[must_use]
pub fn format_listing(items: &[&InstalledContent]) -> Vec<String> {
    let width = items.iter().map(|item| item.id.to_string().len()).max().unwrap_or(0);
    items
        .iter()
        .map(|item| {
            let version = item.version.as_deref().unwrap_or("(unknown version)");
            format!("  {:<width$}  {}", item.id.to_string(), version)
        })
        .collect()
}

/// Delete every installed item selected by `filter`, returning what was removed.
pub async fn remove(ctx: &ExecutionContext, filter: &MatchFilter) -> Result<Vec<InstalledContent>> {
    let installed = installed_content(&ctx.content_path).await?;

    for term in filter.unmatched_terms(installed.iter().map(|item| &item.id)) {
        println!("{}", format!("'{term}' is not installed, skipping").yellow());
    }

    let mut removed = Vec::new();
    for item in installed.into_iter().filter(|item| filter.matches(&item.id)) {
        remove_path(&item).await?;
        tracing::info!("removed {} from {}", item.id, item.path.display());
        println!("{}", format!("Removed {}", item.id).green());
        removed.push(item);
    }
    Ok(removed)
}

async fn remove_path(item: &InstalledContent) -> Result<()> {
    let metadata = fs::symlink_metadata(&item.path)
        .await
        .with_context(|| format!("Failed to inspect {}", item.path.display()))?;

    // editable installs are symlinks; never follow them into the source tree
    let result = if metadata.file_type().is_symlink() {
        fs::remove_file(&item.path).await
    } else {
        fs::remove_dir_all(&item.path).await
    };
    result.with_context(|| format!("Failed to remove {}", item.path.display()))
}

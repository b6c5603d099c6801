//! `install` for a single spec: local collection directories only.

use crate::content::{
    CollectionMetadata, ContentSpec, InstalledContent, SpecSource, install_dir,
};
use crate::context::ExecutionContext;
use crate::core::MazerError;
use crate::matchers::ContentId;
use crate::utils::paths::absolute_path;
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

use super::InstallOptions;

pub async fn install(
    ctx: &ExecutionContext,
    spec: &ContentSpec,
    options: &InstallOptions,
) -> Result<InstalledContent> {
    match &spec.source {
        SpecSource::LocalPath(path) => install_local(ctx, spec, path, options).await,
        SpecSource::Registry { .. } => Err(MazerError::content_failure(
            &spec.raw,
            "fetching from the registry is not supported by the local installer",
        )
        .into()),
        SpecSource::Scm(url) => Err(MazerError::content_failure(
            &spec.raw,
            format!("cloning {url} is not supported by the local installer"),
        )
        .into()),
    }
}

async fn install_local(
    ctx: &ExecutionContext,
    spec: &ContentSpec,
    path: &Path,
    options: &InstallOptions,
) -> Result<InstalledContent> {
    let fail = |reason: String| anyhow::Error::from(MazerError::content_failure(&spec.raw, reason));

    let source = absolute_path(&path.to_string_lossy())?;
    match fs::metadata(&source).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(fail(
                "installing from archives is not supported by the local installer".to_string(),
            ));
        }
        Err(_) => return Err(fail(format!("{} does not exist", source.display()))),
    }

    let metadata = CollectionMetadata::load(&source).await.map_err(|e| fail(format!("{e:#}")))?;

    let Some(namespace) = spec
        .namespace_override
        .clone()
        .or_else(|| metadata.as_ref().map(|m| m.namespace.clone()))
    else {
        return Err(fail(
            "no namespace found; use --namespace when installing a directory without galaxy.yml"
                .to_string(),
        ));
    };
    let name = match &metadata {
        Some(m) => m.name.clone(),
        None => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| fail(format!("cannot derive a name from {}", source.display())))?,
    };
    let version = metadata.and_then(|m| m.version);

    if let (Some(wanted), Some(found)) = (&spec.version, &version)
        && wanted != found
    {
        return Err(fail(format!("requested version {wanted} but the directory holds {found}")));
    }

    let id = ContentId::new(namespace, name);
    let dest = install_dir(&ctx.content_path, &id);

    if fs::symlink_metadata(&dest).await.is_ok() {
        if !options.force {
            return Err(fail(format!(
                "{id} is already installed at {}; use --force to overwrite",
                dest.display()
            )));
        }
        remove_existing(&dest).await?;
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let placed = if options.editable {
        link_dir(&source, &dest).await
    } else {
        let (from, to) = (source.clone(), dest.clone());
        tokio::task::spawn_blocking(move || copy_dir(&from, &to))
            .await
            .map_err(|e| anyhow!("Task join error while copying {}: {}", source.display(), e))?
    };
    if let Err(e) = placed {
        if fs::symlink_metadata(&dest).await.is_ok() {
            remove_existing(&dest).await?;
        }
        return Err(e);
    }

    if !options.no_deps {
        tracing::debug!("dependencies of {} are not resolved by the local installer", id);
    }

    println!("{}", format!("Installed {id} to {}", dest.display()).green());
    Ok(InstalledContent {
        id,
        path: dest,
        version,
    })
}

async fn remove_existing(dest: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(dest).await?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(dest).await
    } else {
        fs::remove_file(dest).await
    };
    result.with_context(|| format!("Failed to remove existing {}", dest.display()))
}

async fn link_dir(source: &Path, dest: &Path) -> Result<()> {
    #[cfg(unix)]
    let result = fs::symlink(source, dest).await;
    #[cfg(windows)]
    let result = fs::symlink_dir(source, dest).await;

    result.with_context(|| format!("Failed to link {} to {}", source.display(), dest.display()))
}

/// Blocking; `dest` may sit inside `source` and is never walked.
fn copy_dir(source: &Path, dest: &Path) -> Result<()> {
    let walker = WalkDir::new(source)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git" && e.path() != dest);
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let relative = entry.path().strip_prefix(source)?;
        let target: PathBuf = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            std::fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}

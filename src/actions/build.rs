//! `build`: package a collection source tree into a zip archive.

use crate::content::CollectionMetadata;
use crate::context::BuildContext;
use crate::core::MazerError;
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// `<namespace>-<name>-<version>.zip`
#[must_use]
pub fn archive_file_name(namespace: &str, name: &str, version: &str) -> String {
    format!("{namespace}-{name}-{version}.zip")
}

/// Build the archive and return its path.
pub async fn build(build: &BuildContext) -> Result<PathBuf> {
    let collection_path = &build.collection_path;
    let metadata = CollectionMetadata::load(collection_path).await?.ok_or_else(|| {
        MazerError::CollectionNotFound {
            path: collection_path.display().to_string(),
        }
    })?;

    let version = metadata.version.as_deref().ok_or_else(|| MazerError::BuildFailed {
        reason: "galaxy.yml has no 'version'".to_string(),
    })?;
    semver::Version::parse(version).map_err(|e| MazerError::BuildFailed {
        reason: format!("version '{version}' is not valid semver: {e}"),
    })?;

    tokio::fs::create_dir_all(&build.output_path)
        .await
        .with_context(|| format!("Failed to create {}", build.output_path.display()))?;

    let archive_path = build
        .output_path
        .join(archive_file_name(&metadata.namespace, &metadata.name, version));
    let (source, output, archive) =
        (collection_path.clone(), build.output_path.clone(), archive_path.clone());
    let (files, digest) = tokio::task::spawn_blocking(move || -> Result<(usize, String)> {
        let files = write_archive(&source, &output, &archive)?;
        Ok((files, sha256_file(&archive)?))
    })
    .await
    .map_err(|e| anyhow!("Task join error while building {}: {}", archive_path.display(), e))??;

    tracing::info!("wrote {} files to {}", files, archive_path.display());
    println!(
        "{}",
        format!(
            "Built collection {}.{} {} at {}",
            metadata.namespace,
            metadata.name,
            version,
            archive_path.display()
        )
        .green()
    );
    println!("sha256: {digest}");
    Ok(archive_path)
}

/// Blocking; run through `spawn_blocking`.
fn write_archive(collection_path: &Path, output_path: &Path, archive_path: &Path) -> Result<usize> {
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create {}", archive_path.display()))?;
    let mut writer = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut count = 0;
    let walker = WalkDir::new(collection_path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git" && e.path() != output_path);

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", collection_path.display()))?;
        let relative = entry.path().strip_prefix(collection_path)?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let name = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut source = File::open(entry.path())
                .with_context(|| format!("Failed to open {}", entry.path().display()))?;
            std::io::copy(&mut source, &mut writer)?;
            count += 1;
        }
    }

    writer.finish()?.flush()?;
    Ok(count)
}

fn sha256_file(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
    );
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

//! `info`: installed details plus, unless offline, the registry's record.

use crate::constants::SKIP_INFO_KEYS;
use crate::content::{ContentSpec, SpecSource, installed_content};
use crate::context::ExecutionContext;
use crate::core::MazerError;
use crate::matchers::ContentId;
use anyhow::Result;
use colored::Colorize;
use serde_json::Value;

pub async fn info(ctx: &ExecutionContext, specs: &[ContentSpec], offline: bool) -> Result<()> {
    let installed = installed_content(&ctx.content_path).await?;
    let client = if offline {
        None
    } else {
        Some(
            reqwest::Client::builder()
                .danger_accept_invalid_certs(ctx.server.ignore_certs)
                .user_agent(concat!("mazer/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| MazerError::NetworkError {
                    operation: "creating HTTP client".to_string(),
                    reason: e.to_string(),
                })?,
        )
    };

    for spec in specs {
        let id = content_id(spec)?;
        println!("{}", id.to_string().bold());

        match installed.iter().find(|item| item.id == id) {
            Some(item) => {
                println!("  {}: {}", "installed".green(), item.path.display());
                if let Some(version) = &item.version {
                    println!("  version: {version}");
                }
            }
            None => println!("  {}", "not installed".yellow()),
        }

        if let Some(client) = &client {
            match fetch_registry_info(client, &ctx.server.url, &id).await? {
                Some(record) => {
                    for (key, value) in filter_info_fields(&record) {
                        println!("  {key}: {value}");
                    }
                }
                None => println!("  {}", "not found on the server".yellow()),
            }
        }
    }

    Ok(())
}

fn content_id(spec: &ContentSpec) -> Result<ContentId, MazerError> {
    match &spec.source {
        SpecSource::Registry { name, .. } => match spec.namespace() {
            Some(namespace) => Ok(ContentId::new(namespace, name.clone())),
            None => Err(MazerError::content_failure(
                &spec.raw,
                "expected 'namespace.name'",
            )),
        },
        SpecSource::LocalPath(_) | SpecSource::Scm(_) => Err(MazerError::content_failure(
            &spec.raw,
            "info only accepts 'namespace.name[,version]' specs",
        )),
    }
}

async fn fetch_registry_info(
    client: &reqwest::Client,
    server_url: &str,
    id: &ContentId,
) -> Result<Option<Value>> {
    let url = format!(
        "{}/api/v2/collections/{}/{}/",
        server_url.trim_end_matches('/'),
        id.namespace,
        id.name
    );
    tracing::debug!("GET {}", url);

    let network_error = |e: reqwest::Error| MazerError::NetworkError {
        operation: format!("GET {url}"),
        reason: e.to_string(),
    };

    let response = client.get(&url).send().await.map_err(network_error)?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let response = response.error_for_status().map_err(network_error)?;
    Ok(Some(response.json::<Value>().await.map_err(network_error)?))
}

/// Flatten a registry record into printable `(key, value)` pairs, dropping
/// the noisy keys and sorting by key.
#[must_use]
pub fn filter_info_fields(record: &Value) -> Vec<(String, String)> {
    let Some(object) = record.as_object() else {
        return Vec::new();
    };

    let mut fields: Vec<(String, String)> = object
        .iter()
        .filter(|(key, _)| !SKIP_INFO_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect();
    fields.sort();
    fields
}

//! Content spec strings: `namespace.name[,version]`, a path, or an SCM URL.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<namespace>[A-Za-z0-9_]+)\.(?P<name>[A-Za-z0-9_]+)$")
        .expect("qualified name pattern is valid")
});

const ARCHIVE_SUFFIXES: [&str; 3] = [".tar.gz", ".tgz", ".zip"];

/// Where a content spec points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// A name to fetch from the registry
    Registry {
        namespace: Option<String>,
        name: String,
    },
    /// A local directory or archive
    LocalPath(PathBuf),
    /// A source-control URL, with any `git+`/`scm+` prefix removed
    Scm(String),
}

/// A parsed content spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSpec {
    /// The string as the user typed it
    pub raw: String,
    pub source: SpecSource,
    pub version: Option<String>,
    /// `--namespace` value, when given
    pub namespace_override: Option<String>,
}

impl ContentSpec {
    /// Classify `raw`. Never fails; unusable specs are reported by whoever
    /// acts on them.
    #[must_use]
    pub fn parse(raw: &str, namespace_override: Option<&str>) -> Self {
        let raw = raw.trim();
        // a comma inside a path is part of the path, not a version separator
        let (location, version) = match raw.rsplit_once(',') {
            Some((_, version)) if version.contains(['/', '\\']) => (raw, None),
            Some((location, version)) if !version.trim().is_empty() => {
                (location.trim(), Some(version.trim().to_string()))
            }
            Some((location, _)) => (location.trim(), None),
            None => (raw, None),
        };

        let source = if let Some(url) =
            location.strip_prefix("git+").or_else(|| location.strip_prefix("scm+"))
        {
            SpecSource::Scm(url.to_string())
        } else if location.contains("://") || location.starts_with("git@") {
            SpecSource::Scm(location.to_string())
        } else if looks_like_path(location) {
            SpecSource::LocalPath(PathBuf::from(location))
        } else if let Some(caps) = QUALIFIED_NAME.captures(location) {
            SpecSource::Registry {
                namespace: Some(caps["namespace"].to_string()),
                name: caps["name"].to_string(),
            }
        } else {
            SpecSource::Registry {
                namespace: None,
                name: location.to_string(),
            }
        };

        Self {
            raw: raw.to_string(),
            source,
            version,
            namespace_override: namespace_override.map(str::to_string),
        }
    }

    /// Namespace to use: the override when present, otherwise the one in the spec.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace_override.as_deref().or(match &self.source {
            SpecSource::Registry { namespace, .. } => namespace.as_deref(),
            _ => None,
        })
    }
}

impl fmt::Display for ContentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn looks_like_path(location: &str) -> bool {
    location.starts_with('.')
        || location.starts_with('/')
        || location.starts_with('~')
        || location.contains(std::path::MAIN_SEPARATOR)
        || location.contains('/')
        || ARCHIVE_SUFFIXES.iter().any(|suffix| location.ends_with(suffix))
        || Path::new(location).exists()
}

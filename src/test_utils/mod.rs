//! Test utilities for Mazer.
//!
//! Fixture builders for collection source trees, installed content and config
//! files, plus opt-in logging for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mazer::test_utils::{CollectionFixture, init_test_logging};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     init_test_logging(None);
//!     let temp = tempfile::TempDir::new().unwrap();
//!     let source = CollectionFixture::new("acme", "web").version("1.0.0").write(temp.path());
//! }
//! ```

use crate::content::install_dir;
use crate::matchers::ContentId;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// With `Some(level)` that level is used; otherwise logging is enabled only if
/// `RUST_LOG` is set. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=mazer=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// A collection source tree with a `galaxy.yml`.
#[derive(Debug, Clone)]
pub struct CollectionFixture {
    namespace: String,
    name: String,
    version: Option<String>,
    files: Vec<(String, String)>,
}

impl CollectionFixture {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            version: Some("1.0.0".to_string()),
            files: vec![("roles/main/tasks/main.yml".to_string(), "---\n".to_string())],
        }
    }

    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    #[must_use]
    pub fn without_version(mut self) -> Self {
        self.version = None;
        self
    }

    #[must_use]
    pub fn file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Write the tree to `<root>/<name>` and return that directory.
    pub fn write(&self, root: &Path) -> PathBuf {
        let dir = root.join(&self.name);
        std::fs::create_dir_all(&dir).expect("create collection dir");

        let mut metadata = format!("namespace: {}\nname: {}\n", self.namespace, self.name);
        if let Some(version) = &self.version {
            metadata.push_str(&format!("version: {version}\n"));
        }
        std::fs::write(dir.join("galaxy.yml"), metadata).expect("write galaxy.yml");

        for (relative, content) in &self.files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create parent dir");
            }
            std::fs::write(path, content).expect("write fixture file");
        }
        dir
    }

    /// Place the collection directly in `content_path` as if installed.
    pub fn install_into(&self, content_path: &Path) -> PathBuf {
        let dest = install_dir(content_path, &ContentId::new(&self.namespace, &self.name));
        let parent = dest.parent().expect("install dir has a parent");
        std::fs::create_dir_all(parent).expect("create namespace dir");
        self.write(parent)
    }
}

/// Write a `mazer.yml` in `dir` pointing both content paths inside `dir`.
///
/// Returns the config file path and the regular content path.
pub fn write_config(dir: &Path) -> (PathBuf, PathBuf) {
    let content_path = dir.join("content");
    let global_content_path = dir.join("global");
    let config_path = dir.join("mazer.yml");
    std::fs::write(
        &config_path,
        format!(
            "server:\n  url: https://galaxy.example.com\n  ignore_certs: false\ncontent_path: {}\nglobal_content_path: {}\n",
            content_path.display(),
            global_content_path.display()
        ),
    )
    .expect("write mazer.yml");
    (config_path, content_path)
}

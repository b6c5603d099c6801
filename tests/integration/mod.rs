//! Integration test suite for Mazer
//!
//! End-to-end tests that run the `mazer` binary against a temporary config
//! file and content path.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: Building collection archives
//! - **config**: Config file discovery through environment variables
//! - **install**: Installing collections and the ignore-errors policy
//! - **list_remove**: Listing and removing installed collections
//! - **options**: Option validation and usage errors

use assert_cmd::Command;
use mazer::test_utils::write_config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod build;
mod config;
mod install;
mod list_remove;
mod options;

/// A temporary home for one test: config file, content path and a work dir.
pub struct TestProject {
    temp: TempDir,
    pub config_path: PathBuf,
    pub content_path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let (config_path, content_path) = write_config(temp.path());
        Self {
            temp,
            config_path,
            content_path,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// `mazer` with `MAZER_CONFIG` pointing at this project's config.
    pub fn mazer(&self) -> Command {
        let mut cmd = Command::cargo_bin("mazer").unwrap();
        cmd.current_dir(self.root())
            .env("MAZER_CONFIG", &self.config_path)
            .env_remove("ANSIBLE_GALAXY_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

//! Action handlers: the collaborators the dispatcher hands work to.
//!
//! [`ActionHandlers`] is the contract the dispatcher relies on. It is called
//! strictly sequentially; `install` is invoked once per content spec, in the
//! order given on the command line, so the ignore-errors policy can be applied
//! between targets.
//!
//! Handlers report a recoverable per-target problem as
//! [`MazerError::ContentFailure`](crate::core::MazerError::ContentFailure).
//! Any other error is treated as unexpected.
//!
//! [`LocalActions`] is the filesystem-backed implementation the binary uses.

mod build;
mod info;
mod install;
mod list;
mod version;

use crate::content::ContentSpec;
use crate::context::{BuildContext, ExecutionContext};
use crate::matchers::MatchFilter;
use anyhow::Result;
use std::future::Future;
use std::path::Path;

pub use build::archive_file_name;
pub use info::filter_info_fields;
pub use list::format_listing;

/// Per-target install switches forwarded from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Link a local directory instead of copying it
    pub editable: bool,
    /// Skip dependency installation
    pub no_deps: bool,
    /// Overwrite an existing installation
    pub force: bool,
}

/// Implementations of the six actions.
pub trait ActionHandlers {
    /// Create a collection archive.
    fn build(&self, ctx: &ExecutionContext, build: &BuildContext) -> impl Future<Output = Result<()>>;

    /// Show details about installed and registry content.
    fn info(
        &self,
        ctx: &ExecutionContext,
        specs: &[ContentSpec],
        offline: bool,
    ) -> impl Future<Output = Result<()>>;

    /// Install a single content spec.
    fn install(
        &self,
        ctx: &ExecutionContext,
        spec: &ContentSpec,
        options: &InstallOptions,
    ) -> impl Future<Output = Result<()>>;

    /// Print installed content selected by `filter`.
    fn list(&self, ctx: &ExecutionContext, filter: &MatchFilter) -> impl Future<Output = Result<()>>;

    /// Delete installed content selected by `filter`.
    fn remove(&self, ctx: &ExecutionContext, filter: &MatchFilter) -> impl Future<Output = Result<()>>;

    /// Print version information.
    fn version(&self, config_file_path: &Path, cli_version: &str) -> impl Future<Output = Result<()>>;
}

/// Filesystem-backed handlers.
///
/// Registry downloads, archives, and SCM checkouts are not fetched; those specs
/// fail per target so `--ignore-errors` can skip them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalActions;

impl LocalActions {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ActionHandlers for LocalActions {
    async fn build(&self, _ctx: &ExecutionContext, build: &BuildContext) -> Result<()> {
        build::build(build).await.map(|_| ())
    }

    async fn info(&self, ctx: &ExecutionContext, specs: &[ContentSpec], offline: bool) -> Result<()> {
        info::info(ctx, specs, offline).await
    }

    async fn install(
        &self,
        ctx: &ExecutionContext,
        spec: &ContentSpec,
        options: &InstallOptions,
    ) -> Result<()> {
        install::install(ctx, spec, options).await.map(|_| ())
    }

    async fn list(&self, ctx: &ExecutionContext, filter: &MatchFilter) -> Result<()> {
        list::list(ctx, filter).await
    }

    async fn remove(&self, ctx: &ExecutionContext, filter: &MatchFilter) -> Result<()> {
        list::remove(ctx, filter).await.map(|_| ())
    }

    async fn version(&self, config_file_path: &Path, cli_version: &str) -> Result<()> {
        version::version(config_file_path, cli_version);
        Ok(())
    }
}

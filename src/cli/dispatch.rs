//! Action dispatch: from a parsed command to a handler call and an outcome.
//!
//! For every action but `version` the flow is:
//!
//! 1. Validate cross-flag rules ([`validate_options`])
//! 2. Load the configuration document and build the [`ExecutionContext`] from
//!    the action's own flags
//! 3. Check positional preconditions (`info` and `remove` need targets)
//! 4. Build the [`MatchFilter`] for `list`/`remove`, or parse content specs
//! 5. Call the handler and map its result
//!
//! `version` skips steps 2 to 4 and only needs the config file path.
//!
//! # Failure mapping
//!
//! - Domain errors ([`MazerError`]) propagate unchanged.
//! - During `install`, a recoverable per-target failure is skipped when
//!   `--ignore-errors` is set and otherwise becomes [`MazerError::IgnoreErrors`],
//!   aborting the remaining targets.
//! - Any other error is logged with its full chain and propagated unchanged.

use super::options::{Commands, InstallArgs, validate_options};
use crate::actions::{ActionHandlers, InstallOptions};
use crate::config::Config;
use crate::constants::IGNORE_ERRORS_BLURB;
use crate::content::ContentSpec;
use crate::context::{BuildContext, ContextOverrides, ExecutionContext, build_execution_context};
use crate::core::{Action, MazerError, as_domain_error};
use crate::matchers::MatchFilter;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// How a successful invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every target was processed
    Success,
    /// `install --ignore-errors` skipped the listed specs
    PartialSuccess {
        failed: Vec<String>,
    },
}

/// Run one parsed command against `handlers`.
///
/// # Errors
///
/// See the module documentation for how failures are reported.
pub async fn dispatch<H: ActionHandlers>(
    command: Commands,
    config_file_path: &Path,
    handlers: &H,
) -> Result<Outcome> {
    validate_options(&command)?;

    let action = command.action();
    tracing::debug!("execute action: {}", action);
    tracing::debug!("execute action with options: {:?}", command);

    match command {
        Commands::Version => {
            log_unexpected(handlers.version(config_file_path, env!("CARGO_PKG_VERSION")).await)?;
        }
        Commands::Build(args) => {
            let ctx = load_context(&args.common.overrides(false), config_file_path).await?;
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            let build = BuildContext::resolve(
                args.collection_path.as_deref(),
                args.output_path.as_deref(),
                &cwd,
            )?;
            tracing::debug!("build context: {:?}", build);
            log_unexpected(handlers.build(&ctx, &build).await)?;
        }
        Commands::Info(args) => {
            let ctx = load_context(&args.common.overrides(false), config_file_path).await?;
            require_targets(action, &args.specs)?;
            let specs: Vec<ContentSpec> =
                args.specs.iter().map(|raw| ContentSpec::parse(raw, None)).collect();
            log_unexpected(handlers.info(&ctx, &specs, args.offline).await)?;
        }
        Commands::Install(args) => {
            let overrides = args.common.overrides(args.global_install);
            let ctx = load_context(&overrides, config_file_path).await?;
            return install_all(handlers, &ctx, &args).await;
        }
        Commands::List(args) => {
            let ctx = load_context(&args.common.overrides(false), config_file_path).await?;
            let filter = MatchFilter::for_list(&args.terms);
            log_unexpected(handlers.list(&ctx, &filter).await)?;
        }
        Commands::Remove(args) => {
            let ctx = load_context(&args.common.overrides(false), config_file_path).await?;
            require_targets(action, &args.names)?;
            let filter = MatchFilter::labels(args.names);
            log_unexpected(handlers.remove(&ctx, &filter).await)?;
        }
    }

    Ok(Outcome::Success)
}

fn require_targets(action: Action, targets: &[String]) -> Result<(), MazerError> {
    if action.requires_targets() && targets.is_empty() {
        return Err(MazerError::options(format!(
            "- you must specify at least one collection to {action}"
        )));
    }
    Ok(())
}

async fn load_context(
    overrides: &ContextOverrides,
    config_file_path: &Path,
) -> Result<ExecutionContext> {
    let config = Config::load(config_file_path).await?;
    tracing::debug!("configuration: {}", serde_json::to_string(&config)?);

    let ctx = build_execution_context(overrides, &config)?;
    tracing::debug!("galaxy context: {:?}", ctx);
    Ok(ctx)
}

/// Install each spec in order, applying the ignore-errors policy between them.
async fn install_all<H: ActionHandlers>(
    handlers: &H,
    ctx: &ExecutionContext,
    args: &InstallArgs,
) -> Result<Outcome> {
    let mut raw_specs = args.specs.clone();
    if let Some(role_file) = &args.role_file {
        raw_specs.extend(read_requirements(role_file).await?);
    }
    if raw_specs.is_empty() {
        tracing::warn!("no content specs given, nothing to install");
    }

    let options = InstallOptions {
        editable: args.editable_install,
        no_deps: args.no_deps,
        force: args.force,
    };

    let mut failed = Vec::new();
    for raw in &raw_specs {
        let spec = ContentSpec::parse(raw, args.namespace.as_deref());
        let Err(error) = handlers.install(ctx, &spec, &options).await else {
            continue;
        };

        match as_domain_error(&error) {
            Some(domain) if domain.is_recoverable() => {
                if !args.ignore_errors {
                    return Err(ignore_errors_failure(domain).into());
                }
                tracing::warn!("skipping {}: {}", spec, domain);
                failed.push(spec.raw);
            }
            Some(_) => return Err(error),
            None => return Err(log_unexpected_error(error)),
        }
    }

    if failed.is_empty() {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::PartialSuccess {
            failed,
        })
    }
}

fn ignore_errors_failure(cause: &MazerError) -> MazerError {
    MazerError::IgnoreErrors {
        message: format!("{cause}:\n{IGNORE_ERRORS_BLURB}"),
    }
}

fn log_unexpected(result: Result<()>) -> Result<()> {
    result.map_err(log_unexpected_error)
}

fn log_unexpected_error(error: anyhow::Error) -> anyhow::Error {
    if as_domain_error(&error).is_none() {
        tracing::error!("unexpected error: {:?}", error);
    }
    error
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Requirement {
    Spec(String),
    Entry {
        name: String,
        #[serde(default)]
        version: Option<String>,
    },
}

/// Read a YAML list of specs: plain strings or `{name, version}` entries.
async fn read_requirements(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        MazerError::options(format!("could not read role file {}: {e}", path.display()))
    })?;
    let requirements: Vec<Requirement> = serde_yaml::from_str(&content).map_err(|e| {
        MazerError::options(format!("invalid role file {}: {e}", path.display()))
    })?;

    Ok(requirements
        .into_iter()
        .map(|req| match req {
            Requirement::Spec(spec) => spec,
            Requirement::Entry {
                name,
                version: Some(version),
            } => format!("{name},{version}"),
            Requirement::Entry {
                name,
                version: None,
            } => name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::options::{CommonArgs, InfoArgs, ListArgs, RemoveArgs};
    use crate::context::ExecutionContext;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every call; `install` fails for specs listed in `fail`.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        fail: Vec<&'static str>,
        unexpected: Vec<&'static str>,
        filters: Mutex<Vec<MatchFilter>>,
        contexts: Mutex<Vec<ExecutionContext>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String, ctx: Option<&ExecutionContext>) {
            self.calls.lock().unwrap().push(call);
            if let Some(ctx) = ctx {
                self.contexts.lock().unwrap().push(ctx.clone());
            }
        }
    }

    impl ActionHandlers for Recorder {
        async fn build(&self, ctx: &ExecutionContext, build: &BuildContext) -> Result<()> {
            self.record(format!("build {}", build.collection_path.display()), Some(ctx));
            Ok(())
        }

        async fn info(&self, ctx: &ExecutionContext, specs: &[ContentSpec], offline: bool) -> Result<()> {
            self.record(format!("info {} offline={offline}", specs.len()), Some(ctx));
            Ok(())
        }

        async fn install(
            &self,
            ctx: &ExecutionContext,
            spec: &ContentSpec,
            _options: &InstallOptions,
        ) -> Result<()> {
            self.record(format!("install {}", spec.raw), Some(ctx));
            if self.fail.contains(&spec.raw.as_str()) {
                return Err(MazerError::content_failure(&spec.raw, "broken").into());
            }
            if self.unexpected.contains(&spec.raw.as_str()) {
                return Err(anyhow::anyhow!("disk on fire"));
            }
            Ok(())
        }

        async fn list(&self, ctx: &ExecutionContext, filter: &MatchFilter) -> Result<()> {
            self.record("list".into(), Some(ctx));
            self.filters.lock().unwrap().push(filter.clone());
            Ok(())
        }

        async fn remove(&self, ctx: &ExecutionContext, filter: &MatchFilter) -> Result<()> {
            self.record("remove".into(), Some(ctx));
            self.filters.lock().unwrap().push(filter.clone());
            Ok(())
        }

        async fn version(&self, config_file_path: &Path, cli_version: &str) -> Result<()> {
            self.record(format!("version {} {cli_version}", config_file_path.display()), None);
            Ok(())
        }
    }

    struct Fixture {
        _temp: TempDir,
        config_path: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("mazer.yml");
        std::fs::write(
            &config_path,
            "server:\n  url: https://galaxy.example.com\ncontent_path: /cfg/content\nglobal_content_path: /cfg/global\n",
        )
        .unwrap();
        Fixture {
            _temp: temp,
            config_path,
        }
    }

    fn install_args(specs: &[&str], ignore_errors: bool) -> Commands {
        Commands::Install(InstallArgs {
            ignore_errors,
            specs: specs.iter().map(|s| (*s).to_string()).collect(),
            ..InstallArgs::default()
        })
    }

    #[tokio::test]
    async fn test_exclusive_flags_fail_before_any_handler() {
        let fx = fixture();
        let handlers = Recorder::default();
        let command = Commands::Install(InstallArgs {
            common: CommonArgs {
                content_path: Some("/tmp/c".into()),
                ..CommonArgs::default()
            },
            global_install: true,
            specs: vec!["acme.web".into()],
            ..InstallArgs::default()
        });

        let err = dispatch(command, &fx.config_path, &handlers).await.unwrap_err();
        assert!(matches!(as_domain_error(&err), Some(MazerError::CliOptions { .. })));
        assert!(handlers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_info_and_remove_require_targets() {
        let fx = fixture();
        let handlers = Recorder::default();

        for command in [
            Commands::Info(InfoArgs::default()),
            Commands::Remove(RemoveArgs::default()),
        ] {
            let err = dispatch(command, &fx.config_path, &handlers).await.unwrap_err();
            assert!(matches!(as_domain_error(&err), Some(MazerError::CliOptions { .. })));
        }
        assert!(handlers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_without_args_matches_all() {
        let fx = fixture();
        let handlers = Recorder::default();

        dispatch(Commands::List(ListArgs::default()), &fx.config_path, &handlers)
            .await
            .unwrap();
        dispatch(
            Commands::List(ListArgs {
                terms: vec!["acme".into()],
                ..ListArgs::default()
            }),
            &fx.config_path,
            &handlers,
        )
        .await
        .unwrap();

        let filters = handlers.filters.lock().unwrap().clone();
        assert_eq!(
            filters,
            vec![MatchFilter::MatchAll, MatchFilter::namespaces_or_labels(["acme"])]
        );
    }

    #[tokio::test]
    async fn test_remove_uses_label_filter() {
        let fx = fixture();
        let handlers = Recorder::default();
        let command = Commands::Remove(RemoveArgs {
            names: vec!["web".into(), "db".into()],
            ..RemoveArgs::default()
        });

        dispatch(command, &fx.config_path, &handlers).await.unwrap();
        let filters = handlers.filters.lock().unwrap().clone();
        assert_eq!(filters, vec![MatchFilter::labels(["web", "db"])]);
    }

    #[tokio::test]
    async fn test_context_comes_from_config_and_flags() {
        let fx = fixture();
        let handlers = Recorder::default();

        dispatch(Commands::List(ListArgs::default()), &fx.config_path, &handlers)
            .await
            .unwrap();
        dispatch(
            Commands::Install(InstallArgs {
                global_install: true,
                common: CommonArgs {
                    server_url: Some("https://mirror.example.com".into()),
                    ignore_certs: true,
                    ..CommonArgs::default()
                },
                specs: vec!["acme.web".into()],
                ..InstallArgs::default()
            }),
            &fx.config_path,
            &handlers,
        )
        .await
        .unwrap();

        let contexts = handlers.contexts.lock().unwrap().clone();
        assert_eq!(contexts[0].content_path, PathBuf::from("/cfg/content"));
        assert_eq!(contexts[0].server.url, "https://galaxy.example.com");
        assert_eq!(contexts[1].content_path, PathBuf::from("/cfg/global"));
        assert_eq!(contexts[1].server.url, "https://mirror.example.com");
        assert!(contexts[1].server.ignore_certs);
    }

    #[tokio::test]
    async fn test_install_failure_without_ignore_errors_stops() {
        let fx = fixture();
        let handlers = Recorder {
            fail: vec!["b.bad"],
            ..Recorder::default()
        };

        let err = dispatch(install_args(&["a.ok", "b.bad", "c.ok"], false), &fx.config_path, &handlers)
            .await
            .unwrap_err();

        match as_domain_error(&err) {
            Some(MazerError::IgnoreErrors { message }) => {
                assert!(message.starts_with("b.bad: broken"));
                assert!(message.ends_with(IGNORE_ERRORS_BLURB));
            }
            other => panic!("expected IgnoreErrors, got {other:?}"),
        }
        assert_eq!(handlers.calls(), vec!["install a.ok", "install b.bad"]);
    }

    #[tokio::test]
    async fn test_install_failure_with_ignore_errors_continues() {
        let fx = fixture();
        let handlers = Recorder {
            fail: vec!["b.bad"],
            ..Recorder::default()
        };

        let outcome = dispatch(install_args(&["a.ok", "b.bad", "c.ok"], true), &fx.config_path, &handlers)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::PartialSuccess {
                failed: vec!["b.bad".into()]
            }
        );
        assert_eq!(handlers.calls(), vec!["install a.ok", "install b.bad", "install c.ok"]);
    }

    #[tokio::test]
    async fn test_unexpected_install_error_is_never_ignored() {
        let fx = fixture();
        let handlers = Recorder {
            unexpected: vec!["b.boom"],
            ..Recorder::default()
        };

        let err = dispatch(install_args(&["b.boom", "c.ok"], true), &fx.config_path, &handlers)
            .await
            .unwrap_err();

        assert!(as_domain_error(&err).is_none());
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(handlers.calls(), vec!["install b.boom"]);
    }

    #[tokio::test]
    async fn test_version_skips_config_and_context() {
        let temp = TempDir::new().unwrap();
        let broken_config = temp.path().join("mazer.yml");
        std::fs::write(&broken_config, "server: [unclosed\n").unwrap();
        let handlers = Recorder::default();

        dispatch(Commands::Version, &broken_config, &handlers).await.unwrap();

        assert_eq!(
            handlers.calls(),
            vec![format!("version {} {}", broken_config.display(), env!("CARGO_PKG_VERSION"))]
        );
    }

    #[tokio::test]
    async fn test_unresolvable_content_path_fails_before_handler() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("mazer.yml");
        std::fs::write(&config_path, "content_path: null\n").unwrap();
        let handlers = Recorder::default();

        let err = dispatch(Commands::List(ListArgs::default()), &config_path, &handlers)
            .await
            .unwrap_err();
        assert!(matches!(
            as_domain_error(&err),
            Some(MazerError::ContentPathUnresolved { .. })
        ));
        assert!(handlers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_role_file_specs_follow_positional_specs() {
        let fx = fixture();
        let role_file = fx.config_path.with_file_name("requirements.yml");
        std::fs::write(&role_file, "- acme.db\n- name: acme.cache\n  version: 2.0.0\n").unwrap();
        let handlers = Recorder::default();

        let command = Commands::Install(InstallArgs {
            role_file: Some(role_file),
            specs: vec!["acme.web".into()],
            ..InstallArgs::default()
        });
        dispatch(command, &fx.config_path, &handlers).await.unwrap();

        assert_eq!(
            handlers.calls(),
            vec!["install acme.web", "install acme.db", "install acme.cache,2.0.0"]
        );
    }

    #[tokio::test]
    async fn test_missing_role_file_is_options_error() {
        let fx = fixture();
        let handlers = Recorder::default();
        let command = Commands::Install(InstallArgs {
            role_file: Some(fx.config_path.with_file_name("absent.yml")),
            ..InstallArgs::default()
        });

        let err = dispatch(command, &fx.config_path, &handlers).await.unwrap_err();
        assert!(matches!(as_domain_error(&err), Some(MazerError::CliOptions { .. })));
        assert!(handlers.calls().is_empty());
    }
}

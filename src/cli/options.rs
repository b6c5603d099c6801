//! Per-action option schemas.
//!
//! Each action owns an `Args` struct. The flags shared by every action except
//! `version` live in [`CommonArgs`] and are flattened in, so an action can only
//! ever read the fields it declares. Cross-flag rules are plain functions over
//! the parsed [`Commands`] value, run by [`validate_options`].

use crate::context::ContextOverrides;
use crate::core::{Action, MazerError};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Flags accepted by every action except `version`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonArgs {
    /// The API server destination
    #[arg(short = 's', long = "server", value_name = "URL")]
    pub server_url: Option<String>,

    /// Ignore SSL certificate validation errors
    #[arg(short = 'c', long)]
    pub ignore_certs: bool,

    /// The path to the directory containing your Galaxy content.
    /// Defaults to the content_path configured in mazer.yml (~/.ansible/content)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub content_path: Option<String>,
}

impl CommonArgs {
    /// Context overrides carried by these flags.
    #[must_use]
    pub fn overrides(&self, global_install: bool) -> ContextOverrides {
        ContextOverrides {
            server_url: self.server_url.clone(),
            ignore_certs: self.ignore_certs.then_some(true),
            content_path: self.content_path.clone(),
            global_install,
        }
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// The path in which the collection repository is located.
    /// The default is the current working directory
    #[arg(long, value_name = "PATH")]
    pub collection_path: Option<String>,

    /// The path in which the collection artifact will be created.
    /// The default is ./releases/
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Prevent Mazer from calling the Galaxy API
    #[arg(long)]
    pub offline: bool,

    /// Collections to describe, as namespace.name[,version]
    #[arg(value_name = "SPEC")]
    pub specs: Vec<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Install content to the path containing your global or system-wide
    /// content (the global_content_path configured in mazer.yml)
    #[arg(short = 'g', long = "global")]
    pub global_install: bool,

    /// Link a local directory into the content path for development and testing
    #[arg(short = 'e', long = "editable")]
    pub editable_install: bool,

    /// Ignore errors and continue with the next specified collection
    #[arg(short = 'i', long)]
    pub ignore_errors: bool,

    /// Don't download collections listed as dependencies
    #[arg(short = 'n', long)]
    pub no_deps: bool,

    /// A YAML file listing content specs to install
    #[arg(short = 'r', long, value_name = "FILE")]
    pub role_file: Option<PathBuf>,

    /// The namespace to use when installing content (required for installs
    /// from local scm repos or archives without metadata)
    #[arg(long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Force overwriting an existing collection
    #[arg(short = 'f', long)]
    pub force: bool,

    /// namespace.name[,version], a path to a directory or archive, or scm+URL[,version]
    #[arg(value_name = "SPEC")]
    pub specs: Vec<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Namespaces or collection names to show
    #[arg(value_name = "NAMESPACE_OR_NAME")]
    pub terms: Vec<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Collections to remove, by name or namespace.name
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

/// The actions Mazer can run.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a collection artifact from a collection source repository
    Build(BuildArgs),

    /// Display detailed information about installed collections and the Galaxy API
    Info(InfoArgs),

    /// Install collections
    Install(InstallArgs),

    /// List collections installed in the content path
    List(ListArgs),

    /// Remove collections from the content path
    Remove(RemoveArgs),

    /// Show version information
    Version,
}

impl Commands {
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Build(_) => Action::Build,
            Self::Info(_) => Action::Info,
            Self::Install(_) => Action::Install,
            Self::List(_) => Action::List,
            Self::Remove(_) => Action::Remove,
            Self::Version => Action::Version,
        }
    }
}

type OptionRule = fn(&Commands) -> Result<(), MazerError>;

const OPTION_RULES: &[OptionRule] = &[content_path_excludes_global];

fn content_path_excludes_global(command: &Commands) -> Result<(), MazerError> {
    match command {
        Commands::Install(args) if args.common.content_path.is_some() && args.global_install => {
            Err(MazerError::options("--content-path and --global are mutually exclusive"))
        }
        _ => Ok(()),
    }
}

/// Apply every cross-flag rule to a parsed command.
///
/// # Errors
///
/// Returns the first [`MazerError::CliOptions`] violation.
pub fn validate_options(command: &Commands) -> Result<(), MazerError> {
    OPTION_RULES.iter().try_for_each(|rule| rule(command))
}

//! Command-line interface for Mazer.
//!
//! The root [`Cli`] holds the global verbosity flags and one of the
//! [`Commands`]. Each action declares its own option schema in [`options`];
//! [`dispatch`] resolves configuration, builds the execution context and hands
//! the work to an [`ActionHandlers`] implementation.
//!
//! # Available Actions
//!
//! - `build` - Create a collection artifact from a source tree
//! - `info` - Show details about installed collections
//! - `install` (alias `content-install`) - Install collections
//! - `list` - List installed collections
//! - `remove` - Remove installed collections
//! - `version` - Show version information
//!
//! # Exit Codes
//!
//! - `0` - Success, including `install --ignore-errors` runs that skipped targets
//! - `1` - A domain or unexpected error
//! - `2` - Usage errors reported by the argument parser
//!
//! # Examples
//!
//! ```bash
//! mazer install ./my_collection
//! mazer install --ignore-errors acme.web acme.db
//! mazer list acme
//! mazer -vv remove web
//! ```

pub mod dispatch;
pub mod options;


pub use dispatch::{Outcome, dispatch};
pub use options::{
    BuildArgs, Commands, CommonArgs, InfoArgs, InstallArgs, ListArgs, RemoveArgs,
    validate_options,
};

use crate::actions::{ActionHandlers, LocalActions};
use crate::config::resolve_config_path;
use crate::core::{ACTION_ALIASES, Action, MazerError};
use anyhow::Result;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use tracing::Level;

/// Mazer: manage Ansible content collections.
///
/// Global flags work before or after the action name.
#[derive(Parser, Debug)]
#[command(
    name = "mazer",
    version,
    about = "Manage Ansible content collections",
    long_about = "Mazer installs, lists, removes and builds Ansible content collections.\n\n\
                  The config file is read from $MAZER_CONFIG, then $ANSIBLE_GALAXY_CONFIG, \
                  then ~/.ansible/mazer.yml."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// The clap command with every entry of [`ACTION_ALIASES`] registered as a
    /// hidden alias of its canonical subcommand.
    #[must_use]
    pub fn command_with_aliases() -> clap::Command {
        ACTION_ALIASES.iter().fold(Self::command(), |command, (alias, action)| {
            command.mut_subcommand(action.name(), |sub| sub.alias(*alias))
        })
    }

    /// Parse `args` (program name first) against [`Cli::command_with_aliases`].
    ///
    /// # Errors
    ///
    /// Returns clap's error for usage problems, `--help` and `--version`.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_with_aliases().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// The log level selected by `-v`/`-q`.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    #[must_use]
    pub const fn subcommand(&self) -> &Commands {
        &self.command
    }

    /// Run the parsed command with the filesystem-backed handlers.
    ///
    /// # Errors
    ///
    /// Returns the failure reported by [`dispatch`].
    pub async fn execute(self) -> Result<Outcome> {
        self.execute_with(&LocalActions::new()).await
    }

    /// Run the parsed command with the given handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if the config path cannot be resolved, or the failure
    /// reported by [`dispatch`].
    pub async fn execute_with<H: ActionHandlers>(self, handlers: &H) -> Result<Outcome> {
        let config_file_path = resolve_config_path()?;
        tracing::debug!("config file path: {}", config_file_path.display());
        dispatch(self.command, &config_file_path, handlers).await
    }
}

/// Map clap's unknown-subcommand error onto [`MazerError::UnknownAction`],
/// with the closest action name as a suggestion.
///
/// Returns `None` for every other parse error.
#[must_use]
pub fn unknown_action(error: &clap::Error) -> Option<MazerError> {
    if error.kind() != ErrorKind::InvalidSubcommand {
        return None;
    }
    match error.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(name)) => Action::resolve(name).err(),
        _ => None,
    }
}

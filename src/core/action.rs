//! The fixed set of top-level actions and their alias table.

use super::error::MazerError;
use std::fmt;
use std::str::FromStr;

/// A canonical top-level action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Build,
    Info,
    Install,
    List,
    Remove,
    Version,
}

/// Alternate spellings accepted for canonical actions.
pub const ACTION_ALIASES: &[(&str, Action)] = &[("content-install", Action::Install)];

impl Action {
    /// Every canonical action, in help-text order.
    pub const ALL: [Self; 6] =
        [Self::Build, Self::Info, Self::Install, Self::List, Self::Remove, Self::Version];

    /// Canonical name as typed on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Info => "info",
            Self::Install => "install",
            Self::List => "list",
            Self::Remove => "remove",
            Self::Version => "version",
        }
    }

    /// Resolve a user-supplied action name, applying [`ACTION_ALIASES`].
    ///
    /// # Errors
    ///
    /// Returns [`MazerError::UnknownAction`] with the closest known name as a
    /// suggestion when nothing matches.
    pub fn resolve(name: &str) -> Result<Self, MazerError> {
        if let Some(action) = Self::ALL.into_iter().find(|a| a.name() == name) {
            return Ok(action);
        }
        if let Some((_, action)) = ACTION_ALIASES.iter().find(|(alias, _)| *alias == name) {
            return Ok(*action);
        }

        let suggestion = Self::ALL
            .iter()
            .map(|a| a.name())
            .chain(ACTION_ALIASES.iter().map(|(alias, _)| *alias))
            .map(|candidate| (candidate, strsim::levenshtein(name, candidate)))
            .filter(|(_, distance)| *distance <= 2)
            .min_by_key(|(_, distance)| *distance)
            .map(|(candidate, _)| candidate.to_string());

        Err(MazerError::UnknownAction {
            name: name.to_string(),
            suggestion,
        })
    }

    /// Actions that refuse to run without at least one positional target.
    #[must_use]
    pub const fn requires_targets(self) -> bool {
        matches!(self, Self::Info | Self::Remove)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = MazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

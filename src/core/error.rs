//! Error handling for Mazer
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** for the conditions the dispatcher has to tell apart
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Taxonomy
//!
//! - [`MazerError::CliOptions`] - invalid or missing arguments, mutually exclusive
//!   flags. Raised before any execution context exists.
//! - [`MazerError::IgnoreErrors`] - a recoverable per-target failure occurred while
//!   `--ignore-errors` was off. The message always ends with
//!   [`IGNORE_ERRORS_BLURB`](crate::constants::IGNORE_ERRORS_BLURB).
//! - [`MazerError::ContentFailure`] - the recoverable per-target failure itself, as
//!   raised by action handlers.
//! - Anything that is not a [`MazerError`] is an *unexpected* error: it is logged with
//!   full detail and propagated unchanged.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mazer::core::{MazerError, user_friendly_error};
//!
//! let error = MazerError::CliOptions {
//!     message: "--content-path and --global are mutually exclusive".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Domain errors raised by the command front-end and its action handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazerError {
    /// Invalid command-line usage detected before any work was done.
    #[error("{message}")]
    CliOptions {
        /// What was wrong with the invocation
        message: String,
    },

    /// A per-target failure that was not suppressed by `--ignore-errors`.
    #[error("{message}")]
    IgnoreErrors {
        /// Failure description followed by the ignore-errors hint
        message: String,
    },

    /// A recoverable failure for one content spec.
    #[error("{spec}: {reason}")]
    ContentFailure {
        /// The content spec being processed
        spec: String,
        /// Why it failed
        reason: String,
    },

    /// No content path could be derived from options or configuration.
    #[error("No content path is configured ({source_name} is empty)")]
    ContentPathUnresolved {
        /// Which setting was expected to supply the path
        source_name: String,
    },

    /// The requested action is not one Mazer knows.
    #[error("Unknown action '{name}'")]
    UnknownAction {
        /// The name as typed by the user
        name: String,
        /// Closest known action, if any is reasonably close
        suggestion: Option<String>,
    },

    /// The configuration file exists but could not be parsed.
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParse {
        /// Path of the offending file
        file: String,
        /// Parser message
        reason: String,
    },

    /// The collection to build has no usable metadata.
    #[error("No collection found at {path}")]
    CollectionNotFound {
        path: String,
    },

    #[error("Failed to build collection: {reason}")]
    BuildFailed {
        reason: String,
    },

    #[error("Network error: {operation}")]
    NetworkError {
        operation: String,
        reason: String,
    },

    #[error("{message}")]
    Other {
        message: String,
    },
}

impl MazerError {
    /// Shorthand for an options error.
    pub fn options(message: impl Into<String>) -> Self {
        Self::CliOptions {
            message: message.into(),
        }
    }

    /// Shorthand for a recoverable per-target failure.
    pub fn content_failure(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContentFailure {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error may be skipped under the ignore-errors policy.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::ContentFailure { .. })
    }
}

/// Returns the [`MazerError`] carried by `error`, if it is a domain error.
#[must_use]
pub fn as_domain_error(error: &anyhow::Error) -> Option<&MazerError> {
    error.downcast_ref::<MazerError>()
}

/// A [`MazerError`] with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MazerError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: MazerError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: message in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Domain errors get tailored suggestions. Anything else is wrapped as
/// [`MazerError::Other`] with its full cause chain in the details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(mazer_error) = as_domain_error(&error) {
        return create_error_context(mazer_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MazerError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion(
                    "Check ownership of the content path, or use --content-path to install somewhere writable",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MazerError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let ctx = ErrorContext::new(MazerError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() {
        ctx
    } else {
        ctx.with_details(chain.join(": "))
    }
}

fn create_error_context(error: MazerError) -> ErrorContext {
    match &error {
        MazerError::CliOptions { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'mazer <action> --help' to see the options for an action"),

        MazerError::UnknownAction { suggestion, .. } => {
            let hint = match suggestion {
                Some(name) => format!("Did you mean '{name}'?"),
                None => "Valid actions are: build, info, install, list, remove, version".to_string(),
            };
            ErrorContext::new(error).with_suggestion(hint)
        }

        MazerError::ContentPathUnresolved { source_name } => {
            let hint = format!("Set '{source_name}' in your mazer.yml or pass --content-path");
            ErrorContext::new(error)
                .with_suggestion(hint)
                .with_details("Mazer needs a directory to read and write installed content")
        }

        MazerError::ConfigParse { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check the YAML syntax of your configuration file")
        }

        MazerError::CollectionNotFound { .. } => ErrorContext::new(error).with_suggestion(
            "Run 'mazer build' from a collection directory or pass --collection-path",
        ),

        MazerError::NetworkError { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check the --server URL and your connection, or use --offline")
        }

        _ => ErrorContext::new(error),
    }
}

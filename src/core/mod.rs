//! Core types for Mazer
//!
//! The action set, its alias table, and the error taxonomy every other module
//! reports through.

pub mod action;
pub mod error;

pub use action::{ACTION_ALIASES, Action};
pub use error::{ErrorContext, MazerError, as_domain_error, user_friendly_error};

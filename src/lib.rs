//! Mazer - a content manager for Ansible collections
//!
//! Mazer installs, lists, removes and builds Ansible content collections. This
//! crate is the command resolution and dispatch layer behind the `mazer`
//! binary: it turns a command line into a resolved configuration, an
//! execution context and a single call into an action handler.
//!
//! # Architecture Overview
//!
//! ```text
//! argv ─▶ cli::Cli ─▶ options::validate_options
//!                 ─▶ config::resolve_config_path ─▶ config::Config::load
//!                 ─▶ context::build_execution_context
//!                 ─▶ matchers::MatchFilter (list/remove)
//!                 ─▶ actions::ActionHandlers
//! ```
//!
//! # Core Modules
//!
//! - [`cli`] - Option schemas per action and the dispatcher
//! - [`config`] - Locating and parsing `mazer.yml`
//! - [`context`] - Merging configuration and flags into an execution context
//! - [`matchers`] - Selecting installed content for `list` and `remove`
//! - [`actions`] - The handler contract and the filesystem-backed handlers
//! - [`content`] - Content specs and the installed-content layout
//! - [`core`] - Actions, aliases and the error taxonomy
//!
//! # Configuration
//!
//! The config file is taken from `MAZER_CONFIG`, then `ANSIBLE_GALAXY_CONFIG`,
//! then `~/.ansible/mazer.yml`:
//!
//! ```yaml
//! server:
//!   url: https://galaxy.ansible.com
//!   ignore_certs: false
//! content_path: ~/.ansible/content
//! global_content_path: /usr/share/ansible/content
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod constants;
pub mod content;
pub mod context;
pub mod core;
pub mod matchers;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

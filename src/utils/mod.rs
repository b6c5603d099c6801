//! Path and logging helpers shared across the crate.

pub mod logging;
pub mod paths;

pub use logging::init_logging;
pub use paths::{absolute_path, expand_user, normalize_path};

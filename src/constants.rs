//! Global constants used throughout the Mazer codebase.
//!
//! Environment variable names, default locations, and fixed user-facing
//! strings live here so the resolver, the context builder, and the tests all
//! agree on them.

/// Primary environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "MAZER_CONFIG";

/// Legacy-compatible alternate, consulted only when [`CONFIG_ENV_VAR`] is unset.
pub const LEGACY_CONFIG_ENV_VAR: &str = "ANSIBLE_GALAXY_CONFIG";

/// Environment variables checked for a config path override, in priority order.
pub const CONFIG_ENV_VARS: [&str; 2] = [CONFIG_ENV_VAR, LEGACY_CONFIG_ENV_VAR];

/// Built-in configuration file location used when no override is present.
pub const DEFAULT_CONFIG_FILE: &str = "~/.ansible/mazer.yml";

/// Default Galaxy API server.
pub const DEFAULT_SERVER_URL: &str = "https://galaxy.ansible.com";

/// Default per-user content path.
pub const DEFAULT_CONTENT_PATH: &str = "~/.ansible/content";

/// Default system-wide content path used by `install --global`.
pub const DEFAULT_GLOBAL_CONTENT_PATH: &str = "/usr/share/ansible/content";

/// Directory below a content path that holds `<namespace>/<name>` trees.
pub const COLLECTIONS_DIR: &str = "ansible_collections";

/// Collection metadata file name.
pub const COLLECTION_METADATA_FILE: &str = "galaxy.yml";

/// Directory, relative to the collection path, that receives built archives.
pub const DEFAULT_RELEASES_DIR: &str = "releases";

/// Suffix appended to every ignore-errors policy failure.
pub const IGNORE_ERRORS_BLURB: &str =
    "- you can use --ignore-errors to skip failed content items and finish processing the list.";

/// Registry fields that `info` does not print.
pub const SKIP_INFO_KEYS: [&str; 8] = [
    "name",
    "description",
    "readme_html",
    "related",
    "summary_fields",
    "average_aw_composite",
    "average_aw_score",
    "url",
];

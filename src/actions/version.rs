//! `version`: name, version, config location, and platform.

use std::path::Path;

pub fn version(config_file_path: &Path, cli_version: &str) {
    for line in version_lines(config_file_path, cli_version) {
        println!("{line}");
    }
}

fn version_lines(config_file_path: &Path, cli_version: &str) -> Vec<String> {
    vec![
        format!("name = {}", env!("CARGO_PKG_NAME")),
        format!("version = {cli_version}"),
        format!("config_file = {}", config_file_path.display()),
        format!("platform = {}-{}", std::env::consts::OS, std::env::consts::ARCH),
        format!(
            "executable_location = {}",
            std::env::current_exe().map_or_else(|_| "unknown".to_string(), |p| p.display().to_string())
        ),
    ]
}

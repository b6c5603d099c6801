use super::TestProject;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_version_reports_config_file() {
    let project = TestProject::new();

    project
        .mazer()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("name = mazer"))
        .stdout(predicate::str::contains(format!("version = {}", env!("CARGO_PKG_VERSION"))))
        .stdout(predicate::str::contains(format!(
            "config_file = {}",
            project.config_path.display()
        )));
}

#[test]
fn test_legacy_env_var_is_honored() {
    let project = TestProject::new();

    Command::cargo_bin("mazer")
        .unwrap()
        .current_dir(project.root())
        .env_remove("MAZER_CONFIG")
        .env("ANSIBLE_GALAXY_CONFIG", &project.config_path)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "config_file = {}",
            project.config_path.display()
        )));
}

#[test]
fn test_mazer_config_wins_over_legacy() {
    let project = TestProject::new();
    let other = project.root().join("other.yml");

    project
        .mazer()
        .env("ANSIBLE_GALAXY_CONFIG", &other)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "config_file = {}",
            project.config_path.display()
        )));
}

#[test]
fn test_malformed_config_is_reported() {
    let project = TestProject::new();
    std::fs::write(&project.config_path, "server: [unclosed\n").unwrap();

    project
        .mazer()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("mazer.yml"));
}

#[test]
fn test_version_ignores_malformed_config() {
    let project = TestProject::new();
    std::fs::write(&project.config_path, "server: [unclosed\n").unwrap();

    project.mazer().arg("version").assert().success();
}

#[test]
fn test_null_content_path_is_a_config_error() {
    let project = TestProject::new();
    std::fs::write(&project.config_path, "content_path: null\n").unwrap();

    project
        .mazer()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("content_path"));
}

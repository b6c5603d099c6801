use super::TestProject;
use predicates::prelude::*;

#[test]
fn test_content_path_and_global_are_exclusive() {
    let project = TestProject::new();

    project
        .mazer()
        .args(["install", "--content-path", "/tmp/mazer-content", "--global", "acme.web"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn test_info_requires_a_target() {
    let project = TestProject::new();

    project
        .mazer()
        .arg("info")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("at least one collection"));
}

#[test]
fn test_remove_requires_a_target() {
    let project = TestProject::new();

    project
        .mazer()
        .arg("remove")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("at least one collection to remove"));
}

#[test]
fn test_unknown_action_is_a_usage_error() {
    let project = TestProject::new();

    project
        .mazer()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown action 'frobnicate'"))
        .stderr(predicate::str::contains("Valid actions are"));
}

#[test]
fn test_misspelled_action_suggests_closest() {
    let project = TestProject::new();

    project
        .mazer()
        .args(["instal", "acme.web"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Did you mean 'install'?"));
}

#[test]
fn test_content_install_alias_reaches_install() {
    let project = TestProject::new();

    project
        .mazer()
        .args(["content-install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore-errors"));
}

#[test]
fn test_version_rejects_content_path() {
    let project = TestProject::new();

    project
        .mazer()
        .args(["version", "--content-path", "/tmp"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_install_help_lists_install_flags() {
    let project = TestProject::new();

    project
        .mazer()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore-errors"))
        .stdout(predicate::str::contains("--global"))
        .stdout(predicate::str::contains("--editable"));
}

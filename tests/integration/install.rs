use super::TestProject;
use mazer::test_utils::CollectionFixture;
use predicates::prelude::*;

#[test]
fn test_install_local_collection() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project
        .mazer()
        .arg("install")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed acme.web"));

    let installed = project.content_path.join("ansible_collections/acme/web");
    assert!(installed.join("galaxy.yml").exists());
    assert!(installed.join("roles/main/tasks/main.yml").exists());
}

#[test]
fn test_content_install_alias() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project.mazer().arg("content-install").arg(&source).assert().success();

    assert!(project.content_path.join("ansible_collections/acme/web").exists());
}

#[test]
fn test_global_install_uses_global_content_path() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project.mazer().args(["install", "--global"]).arg(&source).assert().success();

    assert!(project.root().join("global/ansible_collections/acme/web").exists());
    assert!(!project.content_path.join("ansible_collections/acme/web").exists());
}

#[test]
fn test_content_path_flag_overrides_config() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());
    let elsewhere = project.root().join("elsewhere");

    project
        .mazer()
        .arg("install")
        .arg("--content-path")
        .arg(&elsewhere)
        .arg(&source)
        .assert()
        .success();

    assert!(elsewhere.join("ansible_collections/acme/web").exists());
}

#[test]
fn test_failed_target_stops_without_ignore_errors() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project
        .mazer()
        .args(["install", "acme.not_local"])
        .arg(&source)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("acme.not_local"))
        .stderr(predicate::str::contains("--ignore-errors"));

    assert!(!project.content_path.join("ansible_collections/acme/web").exists());
}

#[test]
fn test_failed_target_skipped_with_ignore_errors() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project
        .mazer()
        .args(["install", "--ignore-errors", "acme.not_local"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed content item(s): acme.not_local"));

    assert!(project.content_path.join("ansible_collections/acme/web").exists());
}

#[test]
fn test_reinstall_requires_force() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project.mazer().arg("install").arg(&source).assert().success();
    project
        .mazer()
        .arg("install")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    project.mazer().args(["install", "--force"]).arg(&source).assert().success();
}

#[test]
fn test_install_from_role_file() {
    let project = TestProject::new();
    let web = CollectionFixture::new("acme", "web").write(project.root());
    let db = CollectionFixture::new("acme", "db").write(project.root());
    let role_file = project.root().join("requirements.yml");
    std::fs::write(
        &role_file,
        format!("- {}\n- name: {}\n  version: 1.0.0\n", web.display(), db.display()),
    )
    .unwrap();

    project.mazer().args(["install", "-r"]).arg(&role_file).assert().success();

    assert!(project.content_path.join("ansible_collections/acme/web").exists());
    assert!(project.content_path.join("ansible_collections/acme/db").exists());
}

use super::TestProject;
use mazer::test_utils::CollectionFixture;
use predicates::prelude::*;

#[test]
fn test_list_empty_content_path() {
    let project = TestProject::new();

    project
        .mazer()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No installed collections found."));
}

#[test]
fn test_list_shows_versions() {
    let project = TestProject::new();
    CollectionFixture::new("acme", "web").version("1.2.0").install_into(&project.content_path);
    CollectionFixture::new("other", "db").without_version().install_into(&project.content_path);

    project
        .mazer()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("acme.web"))
        .stdout(predicate::str::contains("1.2.0"))
        .stdout(predicate::str::contains("other.db"));
}

#[test]
fn test_list_filters_by_namespace_or_name() {
    let project = TestProject::new();
    CollectionFixture::new("acme", "web").install_into(&project.content_path);
    CollectionFixture::new("other", "db").install_into(&project.content_path);

    project
        .mazer()
        .args(["list", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme.web"))
        .stdout(predicate::str::contains("other.db").not());

    project
        .mazer()
        .args(["list", "db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("other.db"))
        .stdout(predicate::str::contains("acme.web").not());
}

#[test]
fn test_remove_by_name() {
    let project = TestProject::new();
    let web = CollectionFixture::new("acme", "web").install_into(&project.content_path);
    let db = CollectionFixture::new("acme", "db").install_into(&project.content_path);

    project
        .mazer()
        .args(["remove", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed acme.web"));

    assert!(!web.exists());
    assert!(db.exists());
}

#[test]
fn test_remove_does_not_match_namespaces() {
    let project = TestProject::new();
    let web = CollectionFixture::new("acme", "web").install_into(&project.content_path);

    project
        .mazer()
        .args(["remove", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'acme' is not installed"));

    assert!(web.exists());
}

#[test]
fn test_info_offline_reports_installed_state() {
    let project = TestProject::new();
    CollectionFixture::new("acme", "web").version("3.0.0").install_into(&project.content_path);

    project
        .mazer()
        .args(["info", "--offline", "acme.web", "acme.ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version: 3.0.0"))
        .stdout(predicate::str::contains("not installed"));
}

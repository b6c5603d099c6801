use super::TestProject;
use mazer::test_utils::CollectionFixture;
use predicates::prelude::*;

#[test]
fn test_build_from_collection_path() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").version("0.3.1").write(project.root());
    let output = project.root().join("out");

    project
        .mazer()
        .arg("build")
        .arg("--collection-path")
        .arg(&source)
        .arg("--output-path")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("sha256: "));

    assert!(output.join("acme-web-0.3.1.zip").exists());
}

#[test]
fn test_build_defaults_to_current_directory() {
    let project = TestProject::new();
    let source = CollectionFixture::new("acme", "web").write(project.root());

    project.mazer().current_dir(&source).arg("build").assert().success();

    assert!(source.join("releases/acme-web-1.0.0.zip").exists());
}

#[test]
fn test_build_outside_a_collection_fails() {
    let project = TestProject::new();

    project
        .mazer()
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("galaxy.yml").or(predicate::str::contains("collection")));
}

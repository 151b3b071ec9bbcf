//! End-to-end tests for the `clean` command

mod common;
use common::prelude::*;

/// Test that clean removes a populated build tree
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_clean_removes_build_tree() {
    let fixture = TestFixture::new().with_file("_build/Echo/task.json", "{}");

    let mut cmd = cargo_bin_cmd!("stagehand");

    cmd.arg("clean")
        .arg("--root")
        .arg(fixture.path())
        .assert()
        .success();

    assert!(fixture.path().join("_build").is_dir());
    assert!(!fixture.path().join("_build/Echo").exists());
}

/// Test that clean succeeds when the build tree does not exist yet
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_clean_on_fresh_checkout() {
    let fixture = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("stagehand");

    cmd.arg("clean")
        .arg("--root")
        .arg(fixture.path())
        .assert()
        .success();

    assert!(fixture.path().join("_build").is_dir());
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn ztools(project: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ztools").unwrap();
    cmd.env_remove("ZTOOLS_PROJECT").arg("--project").arg(project);
    cmd
}

#[test]
fn test_init_config_writes_once() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("ztools.yaml");

    ztools(temp.path())
        .args(["init", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("packages:"));
    assert!(content.contains("com.unity.cinemachine"));

    fs::write(&config, "packages: []\n").unwrap();
    ztools(temp.path())
        .args(["init", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped"));
    assert_eq!(fs::read_to_string(&config).unwrap(), "packages: []\n");

    ztools(temp.path())
        .args(["init", "config", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&config).unwrap().contains("cooldown_ms"));
}

#[test]
fn test_empty_package_list_is_noop() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("ztools.yaml"), "packages: []\n").unwrap();

    ztools(temp.path())
        .args(["init", "packages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages configured."));
}

#[test]
fn test_version() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ztools").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

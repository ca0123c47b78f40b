//! Tests for `stowaway init` command.

use crate::support::*;
use std::fs;

#[test]
fn test_init_creates_config_identity_and_store() {
    let t = Test::new();

    let output = t.init_cmd("test-user");
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    let config = fs::read_to_string(t.dir.path().join(".stowaway.toml")).unwrap();
    assert!(config.contains("[workspace]"));
    assert!(config.contains("default_environment = \"dev\""));

    let identity = t.home.path().join(".stowaway/identity.toml");
    assert!(identity.exists(), "identity should exist");
    assert!(fs::read_to_string(identity).unwrap().contains("test-user"));

    assert!(t.dir.path().join(".stowaway/remote.json").exists());
}

#[cfg(unix)]
#[test]
fn test_identity_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::init("test-user");
    let path = t.home.path().join(".stowaway/identity.toml");
    let mode = fs::metadata(path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_init_in_already_initialized_dir_fails() {
    let t = Test::init("test-user");

    let output = t.init_cmd("test-user");
    assert_failure(&output);
    assert_stderr_contains(&output, "already initialized");
}

#[test]
fn test_second_workspace_reuses_identity() {
    let t = Test::init("alice");
    let identity = fs::read_to_string(t.home.path().join(".stowaway/identity.toml")).unwrap();

    let other = tempfile::TempDir::new().unwrap();
    t.cmd()
        .current_dir(other.path())
        .args(["init", "--name", "someone-else"])
        .assert()
        .success();

    let after = fs::read_to_string(t.home.path().join(".stowaway/identity.toml")).unwrap();
    assert_eq!(identity, after);
}

#[test]
fn test_init_over_stale_store_names_the_store() {
    let t = Test::new();
    fs::create_dir_all(t.dir.path().join(".stowaway")).unwrap();
    fs::write(t.dir.path().join(".stowaway/remote.json"), "{}").unwrap();

    let output = t.init_cmd("test-user");
    assert_failure(&output);
    assert_stderr_contains(&output, "store already exists at");
    assert_stderr_contains(&output, "remove the stale store");
    assert!(!t.dir.path().join(".stowaway.toml").exists());
}

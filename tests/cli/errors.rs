//! Error paths exit with status 1 and say why.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_not_initialized() {
    let t = Test::new();

    t.cmd()
        .arg("secrets")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not initialized"))
        .stderr(predicate::str::contains("stowaway init"));
}

#[test]
fn test_leading_digit_key_rejected_before_any_write() {
    let t = Test::init("alice");
    let before = t.store_contents();

    let output = t.set(&["OK=1", "1KEY=v"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot start with a number");
    assert_eq!(t.store_contents(), before);
}

#[test]
fn test_empty_value_rejected() {
    let t = Test::init("alice");

    let output = t.set(&["KEY="]);
    assert_failure(&output);
    assert_stderr_contains(&output, "non-empty key and value");
}

#[test]
fn test_missing_separator_rejected() {
    let t = Test::init("alice");

    let output = t.set(&["KEY"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "KEY=VALUE");
}

#[test]
fn test_duplicate_key_rejected() {
    let t = Test::init("alice");

    let output = t.set(&["KEY=1", "key=2"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "more than once");
}

#[test]
fn test_invalid_environment() {
    let t = Test::init("alice");

    let output = t.set_in("production", &["A=1"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid environment");
}

#[test]
fn test_foreign_identity_cannot_unlock() {
    let t = Test::with_secrets("alice", &[("A", "1")]);
    let stranger = tempfile::TempDir::new().unwrap();

    t.cmd()
        .env("HOME", stranger.path())
        .env("USERPROFILE", stranger.path())
        .arg("secrets")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no identity found"));
}

#[test]
fn test_tampered_store_fails_integrity() {
    let t = Test::with_secrets("alice", &[("A", "1")]);
    let path = t.dir.path().join(".stowaway/remote.json");

    let mut store: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let secret = &mut store["environments"]["dev"][0];
    secret["sealed_value"]["auth_tag"] = serde_json::Value::String("AAAAAAAAAAAAAAAAAAAAAA==".to_string());
    std::fs::write(&path, serde_json::to_string(&store).unwrap()).unwrap();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "integrity check failed");
}

//! Tests for `stowaway secrets` commands.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_set_then_list() {
    let t = Test::with_secrets("alice", STANDARD_SECRETS);

    let output = t.list();
    assert_success(&output);
    for (key, value) in STANDARD_SECRETS {
        assert_stdout_contains(&output, key);
        assert_stdout_contains(&output, value);
    }
    assert_stdout_contains(&output, "shared");
}

#[test]
fn test_set_reports_status_per_key() {
    let t = Test::with_secrets("alice", &[("A", "1"), ("B", "2")]);

    let output = t.set(&["a=1", "B=3", "C=4"]);
    assert_success(&output);
    assert_eq!(status_of(&output, "A").as_deref(), Some("SECRET VALUE UNCHANGED"));
    assert_eq!(status_of(&output, "B").as_deref(), Some("SECRET VALUE MODIFIED"));
    assert_eq!(status_of(&output, "C").as_deref(), Some("SECRET CREATED"));
}

#[test]
fn test_keys_are_case_insensitive() {
    let t = Test::with_secrets("alice", &[("db_url", "x")]);

    let output = t.get(&["DB_URL"]);
    assert_success(&output);
    assert_stdout_contains(&output, "DB_URL");
    assert_stdout_contains(&output, "x");
}

#[test]
fn test_get_marks_missing_names() {
    let t = Test::with_secrets("alice", &[("A", "1")]);

    let output = t.get(&["a", "MISSING"]);
    assert_success(&output);
    assert_stdout_contains(&output, "*not found*");
    assert_stdout_contains(&output, "MISSING");
}

#[test]
fn test_value_may_contain_equals() {
    let t = Test::with_secrets("alice", &[("URL", "postgres://u:p@h/db?sslmode=require")]);

    let output = t.get(&["URL"]);
    assert_success(&output);
    assert_stdout_contains(&output, "sslmode=require");
}

#[test]
fn test_store_never_holds_plaintext() {
    let t = Test::with_secrets("alice", &[("JWT_SECRET", "super-secret-jwt-token")]);

    let raw = t.store_contents();
    assert!(!raw.contains("super-secret-jwt-token"));
    assert!(!raw.contains("JWT_SECRET"));
}

#[test]
fn test_delete_removes_secret() {
    let t = Test::with_secrets("alice", &[("A", "1"), ("B", "2")]);

    let output = t.delete(&["a"]);
    assert_success(&output);
    assert_stdout_contains(&output, "deleted 1");

    let output = t.get(&["A", "B"]);
    assert_stdout_contains(&output, "*not found*");
    assert_stdout_contains(&output, "2");
}

#[test]
fn test_delete_with_unknown_name_deletes_nothing() {
    let t = Test::with_secrets("alice", &[("A", "1"), ("B", "2")]);

    let output = t.delete(&["A", "C", "D"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "[C, D]");

    let output = t.get(&["A"]);
    assert_stdout_excludes(&output, "*not found*");
}

#[test]
fn test_environments_are_separate() {
    let t = Test::with_secrets("alice", &[("A", "dev-value")]);

    let output = t.set_in("prod", &["A=prod-value"]);
    assert_success(&output);
    assert_eq!(status_of(&output, "A").as_deref(), Some("SECRET CREATED"));

    let output = t.list_in("prod");
    assert_stdout_contains(&output, "prod-value");
    assert_stdout_excludes(&output, "dev-value");
}

#[test]
fn test_empty_environment_lists_nothing() {
    let t = Test::init("alice");

    t.cmd()
        .args(["secrets", "--env", "staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no secrets in staging"));
}

#[test]
fn test_list_expands_references_by_default() {
    let t = Test::with_secrets("alice", &[("HOST", "db.local"), ("URL", "postgres://${HOST}/app")]);

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "postgres://db.local/app");
    assert_stdout_excludes(&output, "${HOST}");
}

#[test]
fn test_list_without_expansion_shows_stored_value() {
    let t = Test::with_secrets("alice", &[("HOST", "db.local"), ("URL", "postgres://${HOST}/app")]);

    t.cmd()
        .args(["secrets", "--expand=false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("postgres://${HOST}/app"));
}

#[test]
fn test_expansion_does_not_rewrite_store() {
    let t = Test::with_secrets("alice", &[("HOST", "db.local"), ("URL", "postgres://${HOST}/app")]);
    assert_success(&t.list());

    let output = t.set(&["URL=postgres://${HOST}/app"]);
    assert_success(&output);
    assert_eq!(status_of(&output, "URL").as_deref(), Some("SECRET VALUE UNCHANGED"));
}

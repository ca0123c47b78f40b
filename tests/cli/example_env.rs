//! Tests for `stowaway secrets generate-example-env`.

use crate::support::*;

#[test]
fn test_untagged_keys_render_without_values() {
    let t = Test::with_secrets("alice", &[("B_KEY", "secret-b"), ("A_KEY", "secret-a")]);

    let output = t.example_env();
    assert_success(&output);
    assert_eq!(stdout(&output), "A_KEY=\n\nB_KEY=\n");
}

#[test]
fn test_empty_workspace_renders_nothing() {
    let t = Test::init("alice");

    let output = t.example_env();
    assert_success(&output);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_tagged_keys_render_under_banner() {
    let t = Test::with_secrets("alice", &[("X", "1"), ("Y", "2"), ("Z", "3")]);
    let path = t.dir.path().join(".stowaway/remote.json");

    let mut store: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let tag = serde_json::json!([{ "id": "t1", "name": "Payments", "slug": "payments" }]);
    for secret in store["environments"]["dev"].as_array_mut().unwrap().iter_mut().skip(1) {
        secret["tags"] = tag.clone();
    }
    std::fs::write(&path, serde_json::to_string(&store).unwrap()).unwrap();

    let output = t.example_env();
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.starts_with("X=\n\n\n#"), "got: {}", out);
    assert!(out.contains(" PAYMENTS "));
    assert!(out.ends_with("Y=\n\nZ=\n"), "got: {}", out);
    assert!(!out.contains('2'));
}

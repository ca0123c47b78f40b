//! Test support utilities for stowaway integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir.
/// Child processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a workspace initialized.
    pub fn init(name: &str) -> Self {
        let t = Self::new();
        let output = t.init_cmd(name);
        assert!(
            output.status.success(),
            "Failed to initialize workspace: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create an initialized test environment with secrets set in `dev`.
    pub fn with_secrets(name: &str, secrets: &[(&str, &str)]) -> Self {
        let t = Self::init(name);
        let assignments: Vec<String> = secrets.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let args: Vec<&str> = assignments.iter().map(String::as_str).collect();
        let output = t.set(&args);
        assert!(
            output.status.success(),
            "Failed to set secrets: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }
}

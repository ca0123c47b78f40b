//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a stowaway command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - Colors and log overrides disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("stowaway").expect("failed to find stowaway binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("STOWAWAY_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `stowaway init --name <name>`.
    pub fn init_cmd(&self, name: &str) -> Output {
        self.cmd()
            .args(["init", "--name", name])
            .output()
            .expect("failed to run stowaway init")
    }

    /// Shortcut for `stowaway secrets set KEY=VALUE...`.
    pub fn set(&self, assignments: &[&str]) -> Output {
        self.cmd()
            .args(["secrets", "set"])
            .args(assignments)
            .output()
            .expect("failed to run stowaway secrets set")
    }

    /// `stowaway secrets set` in a specific environment.
    pub fn set_in(&self, env: &str, assignments: &[&str]) -> Output {
        self.cmd()
            .args(["secrets", "--env", env, "set"])
            .args(assignments)
            .output()
            .expect("failed to run stowaway secrets set")
    }

    /// Shortcut for `stowaway secrets get NAME...`.
    pub fn get(&self, names: &[&str]) -> Output {
        self.cmd()
            .args(["secrets", "get"])
            .args(names)
            .output()
            .expect("failed to run stowaway secrets get")
    }

    /// Shortcut for `stowaway secrets delete NAME...`.
    pub fn delete(&self, names: &[&str]) -> Output {
        self.cmd()
            .args(["secrets", "delete"])
            .args(names)
            .output()
            .expect("failed to run stowaway secrets delete")
    }

    /// Shortcut for `stowaway secrets`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("secrets")
            .output()
            .expect("failed to run stowaway secrets")
    }

    /// `stowaway secrets` in a specific environment.
    pub fn list_in(&self, env: &str) -> Output {
        self.cmd()
            .args(["secrets", "--env", env])
            .output()
            .expect("failed to run stowaway secrets")
    }

    /// Shortcut for `stowaway secrets generate-example-env`.
    pub fn example_env(&self) -> Output {
        self.cmd()
            .args(["secrets", "generate-example-env"])
            .output()
            .expect("failed to run stowaway secrets generate-example-env")
    }

    /// Raw contents of the file-backed store.
    pub fn store_contents(&self) -> String {
        std::fs::read_to_string(self.dir.path().join(".stowaway/remote.json"))
            .expect("failed to read store")
    }
}

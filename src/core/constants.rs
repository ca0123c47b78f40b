//! Constants used throughout stowaway.
//!
//! Centralizes magic strings and configuration values.

/// Workspace configuration file name (.stowaway.toml).
pub const CONFIG_FILE: &str = ".stowaway.toml";

/// Default location of the file-backed remote store, relative to the project.
pub const DEFAULT_STORE: &str = ".stowaway/remote.json";

/// Identity directory relative to HOME (~/.stowaway).
pub const IDENTITY_DIR: &str = ".stowaway";

/// Identity file name inside [`IDENTITY_DIR`].
pub const IDENTITY_FILE: &str = "identity.toml";

/// Environment used when neither the command line nor the config names one.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Environments a secret may live in.
pub const ENVIRONMENTS: &[&str] = &["dev", "test", "staging", "prod"];

/// Marker separating a secret comment from its template default value.
pub const DEFAULT_MARKER: &str = "DEFAULT:";

/// Width of the star rule inside a template group banner.
pub const BANNER_WIDTH: usize = 80;

/// Placeholder shown for requested secrets that do not exist.
pub const NOT_FOUND: &str = "*not found*";

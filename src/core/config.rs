//! Configuration file management.
//!
//! Handles reading, writing, and validating `.stowaway.toml` workspace files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::types::{Environment, WorkspaceId};
use crate::core::validation::validate_environment;
use crate::error::{ConfigError, Result};

/// Workspace configuration stored in `.stowaway.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub workspace: Workspace,
}

/// The `[workspace]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Remote workspace identifier
    pub id: WorkspaceId,
    /// Environment used when `--env` is not given
    #[serde(default = "default_environment")]
    pub default_environment: Environment,
    /// Path of the file-backed remote store, relative to the workspace root
    #[serde(default = "default_store")]
    pub store: String,
}

fn default_environment() -> Environment {
    constants::DEFAULT_ENVIRONMENT.to_string()
}

fn default_store() -> String {
    constants::DEFAULT_STORE.to_string()
}

impl Config {
    /// Create a configuration for `id` with default settings
    pub fn new(id: impl Into<WorkspaceId>) -> Self {
        Self {
            workspace: Workspace {
                id: id.into(),
                default_environment: default_environment(),
                store: default_store(),
            },
        }
    }

    /// Path to the configuration file inside `root`
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists in the current directory
    pub fn exists() -> bool {
        Self::config_path(Path::new(".")).exists()
    }

    /// Load configuration from `.stowaway.toml` in the current directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration from `.stowaway.toml` inside `root`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load_from(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        config.validate()?;

        debug!(workspace = %config.workspace.id, "config loaded");
        Ok(config)
    }

    /// Save configuration to `.stowaway.toml` in the current directory
    pub fn save(&self) -> Result<()> {
        self.save_to(Path::new("."))
    }

    /// Save configuration to `.stowaway.toml` inside `root`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save_to(&self, root: &Path) -> Result<()> {
        debug!("saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(Self::config_path(root), contents)?;

        Ok(())
    }

    /// Store path relative to the current directory
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.workspace.store)
    }

    /// Resolve the environment to act on: explicit choice or the default
    pub fn environment(&self, explicit: Option<&str>) -> Environment {
        explicit
            .map(str::to_string)
            .unwrap_or_else(|| self.workspace.default_environment.clone())
    }

    /// Validate the configuration structure and contents
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` for an empty id or store, or
    /// `ValidationError::InvalidEnvironment` for a bad default environment.
    pub fn validate(&self) -> Result<()> {
        if self.workspace.id.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "id" }.into());
        }
        if self.workspace.store.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "store" }.into());
        }
        validate_environment(&self.workspace.default_environment)?;

        Ok(())
    }
}

//! User identity storage.
//!
//! The current user's x25519 key pair lives in `~/.stowaway/identity.toml`
//! and is shared by every workspace the user belongs to.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::KeyPair;
use crate::core::constants::{IDENTITY_DIR, IDENTITY_FILE};
use crate::error::{KeyError, Result};

#[derive(Serialize, Deserialize)]
struct IdentityFile {
    name: String,
    public_key: String,
    private_key: String,
}

/// The logged-in user.
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    pub key_pair: KeyPair,
}

/// Identity file manager.
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    /// Key store under the user's home directory (`~/.stowaway`).
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(home.join(IDENTITY_DIR))
    }

    /// Key store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the identity file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(IDENTITY_FILE)
    }

    /// Whether an identity has been generated.
    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Generate and persist a new identity.
    ///
    /// The file is written with 0600 permissions on Unix.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::WriteFailed` if the file cannot be written.
    pub fn generate(&self, name: &str) -> Result<Identity> {
        let key_pair = KeyPair::generate();

        let file = IdentityFile {
            name: name.to_string(),
            public_key: key_pair.public_key().to_string(),
            private_key: key_pair.expose_private_key().to_string(),
        };
        let contents = Zeroizing::new(
            toml::to_string_pretty(&file).map_err(|e| KeyError::InvalidFormat(e.to_string()))?,
        );

        fs::create_dir_all(&self.dir).map_err(KeyError::WriteFailed)?;
        let path = self.path();

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Key file is private from the moment it exists (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&path).map_err(KeyError::WriteFailed)?;

        // mode only applies on creation; tighten a file that already existed
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(KeyError::WriteFailed)?;
        }
        file.write_all(contents.as_bytes())
            .map_err(KeyError::WriteFailed)?;

        debug!(path = %path.display(), name, "identity generated");
        Ok(Identity {
            name: name.to_string(),
            key_pair,
        })
    }

    /// Load the stored identity.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::NoIdentity` if none exists, or
    /// `KeyError::InvalidFormat` if the file is malformed.
    pub fn load(&self) -> Result<Identity> {
        let path = self.path();
        if !path.exists() {
            return Err(KeyError::NoIdentity(path.display().to_string()).into());
        }

        let contents = Zeroizing::new(fs::read_to_string(&path).map_err(KeyError::ReadFailed)?);
        let file: IdentityFile =
            toml::from_str(&contents).map_err(|e| KeyError::InvalidFormat(e.to_string()))?;
        let private_key = Zeroizing::new(file.private_key);

        debug!(name = %file.name, "identity loaded");
        Ok(Identity {
            name: file.name,
            key_pair: KeyPair::from_base64(file.public_key, private_key.as_str()),
        })
    }

    /// Load the stored identity, generating one named `name` if absent.
    pub fn load_or_generate(&self, name: &str) -> Result<Identity> {
        if self.exists() {
            self.load()
        } else {
            self.generate(name)
        }
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Init command - initialize a stowaway workspace.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{info, warn};

use crate::cli::output;
use crate::core::cipher::{EncryptedEnvelope, ProjectKey};
use crate::core::config::Config;
use crate::core::keystore::KeyStore;
use crate::core::remote::FileRemote;
use crate::error::{ConfigError, Result};

fn new_workspace_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Initialize stowaway in the current directory.
///
/// Reuses the user's identity if one exists, then creates a fresh project
/// key, seals it to that identity and writes an empty store.
pub fn execute(name: Option<String>) -> Result<()> {
    if Config::exists() {
        return Err(ConfigError::AlreadyInitialized.into());
    }

    let name = name.unwrap_or_else(whoami::username);
    info!("Initializing for user: {}", name);

    let identity = KeyStore::new().load_or_generate(&name)?;
    let config = Config::new(new_workspace_id());

    let project_key = ProjectKey::generate();
    let me = &identity.key_pair;
    let envelope = EncryptedEnvelope::seal(&project_key, me.public_key(), me)?;

    let remote = FileRemote::create(config.store_path(), &config.workspace.id)?;
    if let Err(e) = remote
        .add_member(me.public_key(), envelope)
        .and_then(|()| config.save())
    {
        // a store without a config would block the next init
        if let Err(cleanup) = std::fs::remove_file(remote.path()) {
            warn!(error = %cleanup, "failed to remove partial store");
        }
        return Err(e);
    }

    output::success("initialized .stowaway.toml");
    output::kv("workspace:", &config.workspace.id);
    output::kv("member:   ", &identity.name);
    output::kv("store:    ", &config.workspace.store);

    info!("Initialized successfully");
    Ok(())
}

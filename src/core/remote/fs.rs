//! File-backed remote store.
//!
//! A JSON document standing in for the secrets server. It only ever holds
//! sealed fields and sealed project key envelopes, so it can live in the
//! project tree. Every batch call reads the document, checks the whole
//! batch, then rewrites the file once.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Context, EnvelopeSource, SecretSource, SecretTransport};
use crate::core::cipher::{self, EncryptedEnvelope, ProjectKey, SealedField};
use crate::core::domain::{normalize_key, SealedSecret, SecretEntry, SecretType, Tag};
use crate::core::types::{Environment, SecretId, WorkspaceId};
use crate::error::{ConfigError, KeyError, Operation, Result, TransportError};

/// One secret as the store keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSecret {
    pub id: SecretId,
    pub sealed_key: SealedField,
    pub sealed_value: SealedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealed_comment: Option<SealedField>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(rename = "type", default)]
    pub secret_type: SecretType,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    workspace_id: WorkspaceId,
    /// Member public key (base64) to that member's project key envelope.
    #[serde(default)]
    envelopes: BTreeMap<String, EncryptedEnvelope>,
    #[serde(default)]
    environments: BTreeMap<Environment, Vec<StoredSecret>>,
}

fn new_id() -> SecretId {
    let mut bytes = [0u8; 12];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// JSON file acting as the remote secret store.
#[derive(Debug, Clone)]
pub struct FileRemote {
    path: PathBuf,
}

impl FileRemote {
    /// Open an existing store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create an empty store for `workspace_id`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StoreExists` if the file exists.
    pub fn create(path: impl Into<PathBuf>, workspace_id: &str) -> Result<Self> {
        let remote = Self::open(path);
        if remote.path.exists() {
            return Err(ConfigError::StoreExists(remote.path.display().to_string()).into());
        }
        if let Some(parent) = remote.path.parent() {
            fs::create_dir_all(parent)?;
        }

        remote.write(&Document {
            workspace_id: workspace_id.to_string(),
            ..Default::default()
        })?;
        debug!(path = %remote.path.display(), "store created");
        Ok(remote)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Document> {
        if !self.path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn read_for(&self, ctx: &Context) -> Result<Document> {
        let doc = self.read()?;
        if doc.workspace_id != ctx.workspace_id {
            return Err(ConfigError::WorkspaceMismatch {
                expected: ctx.workspace_id.clone(),
                actual: doc.workspace_id,
            }
            .into());
        }
        Ok(doc)
    }

    fn write(&self, doc: &Document) -> Result<()> {
        let contents = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Give `public_key` (base64) access by storing its envelope.
    pub fn add_member(&self, public_key: &str, envelope: EncryptedEnvelope) -> Result<()> {
        let mut doc = self.read()?;
        doc.envelopes.insert(public_key.to_string(), envelope);
        self.write(&doc)
    }

    /// Replace the tags and comment of the secret named `name`.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::UnknownNames` if no secret has that name.
    pub fn annotate(
        &self,
        ctx: &Context,
        key: &ProjectKey,
        name: &str,
        tags: Vec<Tag>,
        comment: &str,
    ) -> Result<()> {
        let mut doc = self.read_for(ctx)?;
        let key_hash = cipher::hash(normalize_key(name).as_bytes());

        let secret = doc
            .environments
            .get_mut(&ctx.environment)
            .and_then(|secrets| {
                secrets
                    .iter_mut()
                    .find(|s| s.sealed_key.plaintext_hash() == key_hash)
            })
            .ok_or_else(|| crate::error::SecretError::UnknownNames(vec![name.to_string()]))?;

        secret.tags = tags;
        secret.sealed_comment = if comment.is_empty() {
            None
        } else {
            Some(cipher::seal(comment, key)?)
        };

        self.write(&doc)
    }
}

impl EnvelopeSource for FileRemote {
    fn project_envelope(&self, ctx: &Context) -> Result<EncryptedEnvelope> {
        let doc = self.read_for(ctx)?;
        let public_key = ctx.key_pair.public_key();
        doc.envelopes
            .get(public_key)
            .cloned()
            .ok_or_else(|| KeyError::NotAMember(public_key.to_string()).into())
    }
}

impl SecretSource for FileRemote {
    fn fetch(&self, ctx: &Context, key: &ProjectKey) -> Result<Vec<SecretEntry>> {
        let doc = self.read_for(ctx)?;
        let stored = doc
            .environments
            .get(&ctx.environment)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let entries = stored
            .iter()
            .map(|s| {
                let name = cipher::open(&s.sealed_key, key)?;
                let value = cipher::open(&s.sealed_value, key)?;
                let comment = match &s.sealed_comment {
                    Some(field) => cipher::open(field, key)?,
                    None => String::new(),
                };

                let mut entry = SecretEntry::new(s.id.clone(), &name, value)
                    .with_tags(s.tags.clone())
                    .with_comment(comment);
                entry.sealed_key = Some(s.sealed_key.clone());
                entry.sealed_value = Some(s.sealed_value.clone());
                entry.secret_type = s.secret_type;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = entries.len(), env = %ctx.environment, "fetched secrets");
        Ok(entries)
    }
}

impl SecretTransport for FileRemote {
    fn batch_create(&self, ctx: &Context, secrets: &[SealedSecret]) -> Result<()> {
        let mut doc = self.read_for(ctx)?;
        let existing = doc.environments.entry(ctx.environment.clone()).or_default();

        let mut created = Vec::with_capacity(secrets.len());
        for secret in secrets {
            let sealed_key = secret.sealed_key.clone().ok_or_else(|| {
                TransportError::new(Operation::Creation, "secret is missing its sealed key")
            })?;

            let key_hash = sealed_key.plaintext_hash();
            let taken = existing
                .iter()
                .chain(created.iter())
                .any(|s: &StoredSecret| s.sealed_key.plaintext_hash() == key_hash);
            if taken {
                return Err(
                    TransportError::new(Operation::Creation, "a secret with that key exists").into(),
                );
            }

            created.push(StoredSecret {
                id: new_id(),
                sealed_key,
                sealed_value: secret.sealed_value.clone(),
                sealed_comment: None,
                tags: Vec::new(),
                secret_type: secret.secret_type,
            });
        }

        existing.extend(created);
        self.write(&doc)
    }

    fn batch_modify(&self, ctx: &Context, secrets: &[SealedSecret]) -> Result<()> {
        let mut doc = self.read_for(ctx)?;
        let existing = doc.environments.entry(ctx.environment.clone()).or_default();

        for secret in secrets {
            let id = secret.id.as_deref().unwrap_or_default();
            let stored = existing.iter_mut().find(|s| s.id == id).ok_or_else(|| {
                TransportError::new(Operation::Modification, format!("no secret with id '{}'", id))
            })?;
            stored.sealed_value = secret.sealed_value.clone();
        }

        // nothing is written unless every id resolved
        self.write(&doc)
    }

    fn batch_delete(&self, ctx: &Context, ids: &[SecretId]) -> Result<()> {
        let mut doc = self.read_for(ctx)?;
        let existing = doc.environments.entry(ctx.environment.clone()).or_default();

        if let Some(missing) = ids.iter().find(|id| !existing.iter().any(|s| &s.id == *id)) {
            return Err(TransportError::new(
                Operation::Deletion,
                format!("no secret with id '{}'", missing),
            )
            .into());
        }

        existing.retain(|s| !ids.contains(&s.id));
        self.write(&doc)
    }
}

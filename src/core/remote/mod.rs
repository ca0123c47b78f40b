//! Remote secret store collaborators.
//!
//! The engine talks to the remote side through three traits so the
//! transport can be swapped without touching reconciliation:
//!
//! - [`EnvelopeSource`]: the current user's sealed project key
//! - [`SecretSource`]: the full secret set of an environment, opened
//! - [`SecretTransport`]: batch create, modify and delete
//!
//! ## Adding a New Backend
//!
//! 1. Implement the three traits
//! 2. Add the implementation in a new file (e.g., `http.rs`)
//! 3. Re-export from this module

use tracing::info;

use crate::core::cipher::{recover_project_key, EncryptedEnvelope, KeyPair, ProjectKey};
use crate::core::domain::{SealedSecret, SecretEntry};
use crate::core::reconcile::Plan;
use crate::core::types::{Environment, SecretId, WorkspaceId};
use crate::error::{Error, Operation, Result, TransportError};

mod fs;

pub use fs::{FileRemote, StoredSecret};

/// Everything a command needs to address the remote side.
///
/// Built once by the caller and passed explicitly; nothing below reads
/// process-wide state.
#[derive(Debug, Clone)]
pub struct Context {
    pub workspace_id: WorkspaceId,
    pub environment: Environment,
    pub key_pair: KeyPair,
}

impl Context {
    pub fn new(
        workspace_id: impl Into<WorkspaceId>,
        environment: impl Into<Environment>,
        key_pair: KeyPair,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            environment: environment.into(),
            key_pair,
        }
    }
}

/// Source of the current user's project key envelope.
pub trait EnvelopeSource {
    /// The envelope addressed to `ctx.key_pair`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::NotAMember` if none exists.
    fn project_envelope(&self, ctx: &Context) -> Result<EncryptedEnvelope>;
}

/// Source of the remote secret set.
pub trait SecretSource {
    /// Every secret in `ctx.environment`, opened with `key`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Integrity` if any stored field fails to open.
    fn fetch(&self, ctx: &Context, key: &ProjectKey) -> Result<Vec<SecretEntry>>;
}

/// Batch calls against the remote set. Each call succeeds or fails as a unit.
pub trait SecretTransport {
    fn batch_create(&self, ctx: &Context, secrets: &[SealedSecret]) -> Result<()>;
    fn batch_modify(&self, ctx: &Context, secrets: &[SealedSecret]) -> Result<()>;
    fn batch_delete(&self, ctx: &Context, ids: &[SecretId]) -> Result<()>;
}

/// A complete remote backend.
pub trait Remote: EnvelopeSource + SecretSource + SecretTransport {}

impl<T: EnvelopeSource + SecretSource + SecretTransport> Remote for T {}

/// Recover the project key for `ctx` from `source`.
///
/// # Errors
///
/// Any failure here is fatal for the command.
pub fn unlock(ctx: &Context, source: &impl EnvelopeSource) -> Result<ProjectKey> {
    let envelope = source.project_envelope(ctx)?;
    recover_project_key(&envelope, &ctx.key_pair)
}

fn in_batch(operation: Operation) -> impl FnOnce(Error) -> Error {
    move |e| match e {
        Error::Transport(t) => Error::Transport(t),
        other => TransportError::new(operation, other.to_string()).into(),
    }
}

/// Send a reconciliation plan: one create batch, then one modify batch.
///
/// Empty batches are skipped. A failed batch stops the command before the
/// next one is attempted; there is no atomicity across the two.
///
/// # Errors
///
/// Returns `TransportError` naming the batch that failed.
pub fn apply(plan: &Plan, transport: &impl SecretTransport, ctx: &Context) -> Result<()> {
    if !plan.to_create().is_empty() {
        transport
            .batch_create(ctx, plan.to_create())
            .map_err(in_batch(Operation::Creation))?;
        info!(count = plan.to_create().len(), env = %ctx.environment, "created secrets");
    }

    if !plan.to_modify().is_empty() {
        transport
            .batch_modify(ctx, plan.to_modify())
            .map_err(in_batch(Operation::Modification))?;
        info!(count = plan.to_modify().len(), env = %ctx.environment, "modified secrets");
    }

    Ok(())
}

/// Send a single delete batch.
///
/// # Errors
///
/// Returns `TransportError` with operation "deletion".
pub fn apply_deletion(ids: &[SecretId], transport: &impl SecretTransport, ctx: &Context) -> Result<()> {
    transport
        .batch_delete(ctx, ids)
        .map_err(in_batch(Operation::Deletion))?;
    info!(count = ids.len(), env = %ctx.environment, "deleted secrets");
    Ok(())
}

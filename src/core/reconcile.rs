//! Reconciliation engine.
//!
//! Diffs a desired secret set against the remote set and partitions it into
//! a create batch, a modify batch and an ordered operation log. The remote set
//! is never touched here; applying the batches is the caller's job.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::cipher::{self, ProjectKey};
use crate::core::domain::{
    normalize_key, OperationKind, SealedSecret, SecretEntry, SecretOperation, SecretType,
};
use crate::core::types::{SecretId, SecretKey};
use crate::core::validation::{validate_key, validate_value};
use crate::error::{Result, SecretError, ValidationError};

/// Index remote entries by normalized key. Later duplicates win.
pub fn index_by_key(remote: &[SecretEntry]) -> HashMap<SecretKey, &SecretEntry> {
    remote
        .iter()
        .map(|entry| (normalize_key(&entry.key), entry))
        .collect()
}

/// Outcome of reconciling a desired set against the remote set.
#[derive(Debug)]
pub struct Plan {
    to_create: Vec<SealedSecret>,
    to_modify: Vec<SealedSecret>,
    operations: Vec<SecretOperation>,
}

impl Plan {
    /// Reconcile `desired` against `remote`.
    ///
    /// Each desired pair is validated, normalized and classified in input
    /// order. Validation is fail-fast: the first bad pair aborts the whole
    /// plan. Modification eligibility compares plaintext values.
    ///
    /// # Arguments
    ///
    /// * `desired` - `(key, value)` pairs in argument order
    /// * `remote` - The current remote secrets, opened to plaintext
    /// * `key` - The recovered project key
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for empty keys or values, keys starting with
    /// a number, or a key given twice; `CipherError` if sealing fails.
    pub fn compute(
        desired: &[(String, String)],
        remote: &[SecretEntry],
        key: &ProjectKey,
    ) -> Result<Self> {
        let by_key = index_by_key(remote);
        let mut seen = HashSet::new();

        let mut to_create = Vec::new();
        let mut to_modify = Vec::new();
        let mut operations = Vec::with_capacity(desired.len());

        for (raw_key, value) in desired {
            validate_key(raw_key)?;
            validate_value(raw_key, value)?;

            let secret_key = normalize_key(raw_key);
            if !seen.insert(secret_key.clone()) {
                return Err(ValidationError::DuplicateKey(secret_key).into());
            }

            let kind = match by_key.get(&secret_key) {
                Some(existing) if existing.value != *value => {
                    to_modify.push(SealedSecret {
                        id: Some(existing.id.clone()),
                        sealed_key: None,
                        sealed_value: cipher::seal(value, key)?,
                        secret_type: existing.secret_type,
                    });
                    OperationKind::Modified
                }
                Some(_) => OperationKind::Unchanged,
                None => {
                    to_create.push(SealedSecret {
                        id: None,
                        sealed_key: Some(cipher::seal(&secret_key, key)?),
                        sealed_value: cipher::seal(value, key)?,
                        secret_type: SecretType::Shared,
                    });
                    OperationKind::Created
                }
            };

            operations.push(SecretOperation {
                key: secret_key,
                value: value.clone(),
                kind,
            });
        }

        debug!(
            create = to_create.len(),
            modify = to_modify.len(),
            total = operations.len(),
            "reconciled"
        );

        Ok(Self {
            to_create,
            to_modify,
            operations,
        })
    }

    /// Entries to send in the create batch.
    pub fn to_create(&self) -> &[SealedSecret] {
        &self.to_create
    }

    /// Entries to send in the modify batch.
    pub fn to_modify(&self) -> &[SealedSecret] {
        &self.to_modify
    }

    /// One decision per desired pair, in input order.
    pub fn operations(&self) -> &[SecretOperation] {
        &self.operations
    }

    /// Decisions of a single kind.
    pub fn of_kind(&self, kind: OperationKind) -> Vec<&SecretOperation> {
        self.operations.iter().filter(|op| op.kind == kind).collect()
    }

    /// Whether nothing needs to be sent.
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_modify.is_empty()
    }
}

/// Reconcile `desired` against `remote`. See [`Plan::compute`].
pub fn reconcile(
    desired: &[(String, String)],
    remote: &[SecretEntry],
    key: &ProjectKey,
) -> Result<Plan> {
    Plan::compute(desired, remote, key)
}

/// Names resolved against the remote set for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    ids: Vec<SecretId>,
    unknown: Vec<String>,
}

impl DeletionPlan {
    /// Ids of the remote entries matching the requested names.
    pub fn ids(&self) -> &[SecretId] {
        &self.ids
    }

    /// Requested names, as given, that matched nothing.
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    /// The ids to delete, or every unknown name if there is any.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::UnknownNames` listing all unknown names; none of
    /// the valid ones may be deleted in that case.
    pub fn into_ids(self) -> Result<Vec<SecretId>> {
        if self.unknown.is_empty() {
            Ok(self.ids)
        } else {
            Err(SecretError::UnknownNames(self.unknown).into())
        }
    }
}

/// Map each requested name (case-insensitive) to the remote entry's id.
pub fn resolve_for_deletion<S: AsRef<str>>(names: &[S], remote: &[SecretEntry]) -> DeletionPlan {
    let by_key = index_by_key(remote);
    let mut ids = Vec::new();
    let mut unknown = Vec::new();

    for name in names {
        let name = name.as_ref();
        match by_key.get(&normalize_key(name)) {
            Some(entry) => ids.push(entry.id.clone()),
            None => unknown.push(name.to_string()),
        }
    }

    debug!(found = ids.len(), unknown = unknown.len(), "resolved names");
    DeletionPlan { ids, unknown }
}

/// Result of looking up one requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a SecretEntry),
    Missing(String),
}

/// Look up requested names (case-insensitive), in request order.
pub fn lookup<'a, S: AsRef<str>>(names: &[S], remote: &'a [SecretEntry]) -> Vec<Lookup<'a>> {
    let by_key = index_by_key(remote);
    names
        .iter()
        .map(|name| match by_key.get(&normalize_key(name.as_ref())) {
            Some(entry) => Lookup::Found(*entry),
            None => Lookup::Missing(name.as_ref().to_string()),
        })
        .collect()
}

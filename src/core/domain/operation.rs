//! Reconciliation decisions, kept for display.

use std::fmt;

use crate::core::types::SecretKey;

/// What reconciliation decided for one desired secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Key was absent remotely and goes into the create batch.
    Created,
    /// Key exists remotely with a different value and goes into the modify batch.
    Modified,
    /// Key exists remotely with the same value; nothing is sent.
    Unchanged,
}

impl OperationKind {
    /// Status text shown in the operations table.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Created => "SECRET CREATED",
            Self::Modified => "SECRET VALUE MODIFIED",
            Self::Unchanged => "SECRET VALUE UNCHANGED",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// Audit record of one reconciliation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretOperation {
    pub key: SecretKey,
    pub value: String,
    pub kind: OperationKind,
}

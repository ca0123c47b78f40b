//! Domain types.

mod operation;
mod secret;

pub use operation::{OperationKind, SecretOperation};
pub use secret::{normalize_key, SealedSecret, SecretEntry, SecretType, Tag};

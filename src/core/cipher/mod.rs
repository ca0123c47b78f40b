//! Cryptographic operations.
//!
//! Two layers:
//!
//! - **Envelope**: the project key travels wrapped in an asymmetric sealed box
//!   addressed to each member. [`recover_project_key`] opens it.
//! - **Fields**: every secret attribute is sealed with the project key using
//!   an authenticated symmetric cipher, alongside a deterministic hash of the
//!   plaintext used for change detection.
//!
//! ## Backends
//!
//! - **AES-256-GCM** ([`AesGcm`]): default field cipher, detached tag.
//! - **x25519 + XChaCha20-Poly1305** (`sealed_box`): envelope cipher.

use sha2::{Digest as _, Sha256};

use crate::core::types::Digest;
use crate::error::{CipherError, Result};

mod aes;
mod envelope;
mod field;
mod key;
mod sealed_box;

pub use aes::AesGcm;
pub use envelope::{recover_project_key, EncryptedEnvelope};
pub use field::SealedField;
pub use key::{KeyPair, ProjectKey, KEY_SIZE};

/// Field cipher trait.
///
/// Abstracts authenticated symmetric encryption of a single secret field so
/// the engine does not depend on a particular AEAD construction.
pub trait Cipher {
    /// Seal plaintext under the project key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the key is malformed or encryption fails.
    fn seal(&self, plaintext: &[u8], key: &ProjectKey) -> Result<SealedField>;

    /// Open a sealed field.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Integrity` if the tag does not verify.
    fn open(&self, field: &SealedField, key: &ProjectKey) -> Result<Vec<u8>>;

    /// Backend name, used in diagnostics.
    fn name(&self) -> &'static str;
}

/// Deterministic SHA-256 digest of `data`, lower-case hex.
///
/// No salt: identical plaintext hashes identically across runs and machines.
pub fn hash(data: &[u8]) -> Digest {
    hex::encode(Sha256::digest(data))
}

/// Seal a plaintext string with the default field cipher.
///
/// This is a convenience wrapper around `AesGcm::seal`.
///
/// # Errors
///
/// Returns `CipherError` if sealing fails.
pub fn seal(plaintext: &str, key: &ProjectKey) -> Result<SealedField> {
    AesGcm.seal(plaintext.as_bytes(), key)
}

/// Open a sealed field with the default field cipher.
///
/// This is a convenience wrapper around `AesGcm::open`.
///
/// # Errors
///
/// Returns `CipherError::Integrity` if authentication fails, or
/// `CipherError::InvalidUtf8` if the plaintext is not text.
pub fn open(field: &SealedField, key: &ProjectKey) -> Result<String> {
    let bytes = AesGcm.open(field, key)?;
    String::from_utf8(bytes).map_err(|_| CipherError::InvalidUtf8.into())
}

//! Project key envelope.
//!
//! The project key is shared with each member as an asymmetric sealed box
//! addressed to that member's public key. Recovering it is the first step of
//! every command that touches secret material.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{sealed_box, KeyPair, ProjectKey};
use crate::error::Result;

/// An asymmetrically sealed project key; all fields base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub cipher_text: String,
    pub nonce: String,
    pub sender_public_key: String,
}

impl EncryptedEnvelope {
    /// Seal `key` for `recipient_public_key` (base64) from `sender`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if either key is malformed.
    pub fn seal(key: &ProjectKey, recipient_public_key: &str, sender: &KeyPair) -> Result<Self> {
        let recipient = decode_lenient("recipient public key", recipient_public_key);
        let sender_private =
            Zeroizing::new(decode_lenient("private key", sender.expose_private_key()));

        let (cipher_text, nonce) = sealed_box::seal(key.as_bytes(), &recipient, &sender_private)?;

        Ok(Self {
            cipher_text: STANDARD.encode(cipher_text),
            nonce: STANDARD.encode(nonce),
            sender_public_key: sender.public_key().to_string(),
        })
    }
}

/// Recover the project key from `envelope` with the current user's key pair.
///
/// Undecodable base64 in any of the four inputs is treated as empty bytes;
/// the box then fails to open and the whole command aborts.
///
/// # Errors
///
/// Returns `CipherError::Integrity` if the envelope does not open, or
/// `CipherError::InvalidKeyLength` if it opens to malformed key material.
pub fn recover_project_key(envelope: &EncryptedEnvelope, key_pair: &KeyPair) -> Result<ProjectKey> {
    let cipher_text = decode_lenient("cipher text", &envelope.cipher_text);
    let nonce = decode_lenient("nonce", &envelope.nonce);
    let sender_public = decode_lenient("sender public key", &envelope.sender_public_key);
    let private_key = Zeroizing::new(decode_lenient("private key", key_pair.expose_private_key()));

    let plaintext = sealed_box::open(&cipher_text, &nonce, &sender_public, &private_key)?;
    let key = ProjectKey::from_bytes(plaintext)?;

    debug!("project key recovered");
    Ok(key)
}

fn decode_lenient(field: &'static str, encoded: &str) -> Vec<u8> {
    STANDARD.decode(encoded).unwrap_or_else(|e| {
        warn!(field, error = %e, "undecodable base64, treating as empty");
        Vec::new()
    })
}

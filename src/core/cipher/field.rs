//! Sealed field wire representation.

use serde::{Deserialize, Serialize};

use crate::core::types::Digest;

/// One encrypted attribute (a secret's key, value or comment).
///
/// Only produced by a [`Cipher`](super::Cipher) or by deserializing a stored
/// field, so a ciphertext always travels with its nonce and tag. Byte fields
/// are base64 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedField {
    #[serde(with = "base64_bytes")]
    cipher_text: Vec<u8>,
    #[serde(with = "base64_bytes")]
    nonce: Vec<u8>,
    #[serde(with = "base64_bytes")]
    auth_tag: Vec<u8>,
    plaintext_hash: Digest,
}

impl SealedField {
    pub(crate) fn new(
        cipher_text: Vec<u8>,
        nonce: Vec<u8>,
        auth_tag: Vec<u8>,
        plaintext_hash: Digest,
    ) -> Self {
        Self {
            cipher_text,
            nonce,
            auth_tag,
            plaintext_hash,
        }
    }

    pub fn cipher_text(&self) -> &[u8] {
        &self.cipher_text
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn auth_tag(&self) -> &[u8] {
        &self.auth_tag
    }

    /// Deterministic digest of the plaintext, for change detection.
    pub fn plaintext_hash(&self) -> &str {
        &self.plaintext_hash
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

//! AES-256-GCM field cipher.
//!
//! Seals each field with a fresh random 96-bit nonce and keeps the 128-bit
//! tag detached from the ciphertext, matching the wire shape of
//! [`SealedField`].

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;

use super::{hash, Cipher, ProjectKey, SealedField, KEY_SIZE};
use crate::error::{CipherError, Result};

/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM backend.
pub struct AesGcm;

impl AesGcm {
    fn cipher(key: &ProjectKey) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| {
            CipherError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: key.as_bytes().len(),
            }
            .into()
        })
    }
}

impl Cipher for AesGcm {
    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }

    fn seal(&self, plaintext: &[u8], key: &ProjectKey) -> Result<SealedField> {
        trace!(cipher = self.name(), plaintext_len = plaintext.len(), "sealing field");

        let cipher = Self::cipher(key)?;

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        let mut buffer = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        Ok(SealedField::new(
            buffer,
            nonce.to_vec(),
            tag.to_vec(),
            hash(plaintext),
        ))
    }

    fn open(&self, field: &SealedField, key: &ProjectKey) -> Result<Vec<u8>> {
        trace!(
            cipher = self.name(),
            ciphertext_len = field.cipher_text().len(),
            "opening field"
        );

        if field.nonce().len() != NONCE_SIZE {
            return Err(CipherError::Integrity(format!(
                "nonce must be {} bytes, got {}",
                NONCE_SIZE,
                field.nonce().len()
            ))
            .into());
        }
        if field.auth_tag().len() != TAG_SIZE {
            return Err(CipherError::Integrity(format!(
                "auth tag must be {} bytes, got {}",
                TAG_SIZE,
                field.auth_tag().len()
            ))
            .into());
        }

        let cipher = Self::cipher(key)?;
        let mut buffer = field.cipher_text().to_vec();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(field.nonce()),
                b"",
                &mut buffer,
                Tag::from_slice(field.auth_tag()),
            )
            .map_err(|_| CipherError::Integrity("auth tag did not verify".to_string()))?;

        Ok(buffer)
    }
}

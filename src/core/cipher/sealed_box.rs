//! Asymmetric sealed box.
//!
//! x25519 Diffie-Hellman between one party's private key and the other's
//! public key, SHA-256 of the shared point as an XChaCha20-Poly1305 key.
//! Either side of the exchange derives the same key, so a box sealed with
//! (sender private, recipient public) opens with (sender public, recipient
//! private).

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::KEY_SIZE;
use crate::error::{CipherError, Result};

/// Size of the XChaCha20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

fn to_key(bytes: &[u8], what: &str) -> Result<[u8; KEY_SIZE]> {
    bytes.try_into().map_err(|_| {
        CipherError::Integrity(format!(
            "{} must be {} bytes, got {}",
            what,
            KEY_SIZE,
            bytes.len()
        ))
        .into()
    })
}

fn box_cipher(public_key: &[u8], private_key: &[u8]) -> Result<XChaCha20Poly1305> {
    let public = PublicKey::from(to_key(public_key, "public key")?);
    let secret = StaticSecret::from(to_key(private_key, "private key")?);

    let shared = secret.diffie_hellman(&public);
    let key: Zeroizing<[u8; KEY_SIZE]> = Zeroizing::new(Sha256::digest(shared.as_bytes()).into());

    XChaCha20Poly1305::new_from_slice(&key[..])
        .map_err(|_| CipherError::Integrity("derived key has wrong length".to_string()).into())
}

/// Seal `plaintext` for `recipient_public`, returning `(cipher_text, nonce)`.
pub fn seal(
    plaintext: &[u8],
    recipient_public: &[u8],
    sender_private: &[u8],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let cipher = box_cipher(recipient_public, sender_private)?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let cipher_text = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    Ok((cipher_text, nonce.to_vec()))
}

/// Open a box sealed by `sender_public` for the holder of `receiver_private`.
///
/// # Errors
///
/// Returns `CipherError::Integrity` on any malformed input or tag failure.
pub fn open(
    cipher_text: &[u8],
    nonce: &[u8],
    sender_public: &[u8],
    receiver_private: &[u8],
) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_SIZE {
        return Err(CipherError::Integrity(format!(
            "nonce must be {} bytes, got {}",
            NONCE_SIZE,
            nonce.len()
        ))
        .into());
    }

    let cipher = box_cipher(sender_public, receiver_private)?;
    cipher
        .decrypt(XNonce::from_slice(nonce), cipher_text)
        .map_err(|_| CipherError::Integrity("envelope authentication failed".to_string()).into())
}

//! Key material: the per-project symmetric key and the user's key pair.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

/// Size of the project key and of x25519 keys, in bytes.
pub const KEY_SIZE: usize = 32;

/// Raw symmetric project key.
///
/// Lives only in process memory for one command; zeroed on drop and
/// redacted from `Debug`.
pub struct ProjectKey(Zeroizing<Vec<u8>>);

impl ProjectKey {
    /// Generate a fresh random project key.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; KEY_SIZE]);
        OsRng.fill_bytes(&mut bytes[..]);
        Self(bytes)
    }

    /// Wrap recovered key bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKeyLength` if `bytes` is not 32 bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let bytes = Zeroizing::new(bytes);
        if bytes.len() != KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            }
            .into());
        }
        Ok(Self(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProjectKey(***)")
    }
}

/// A user's x25519 key pair, both halves base64-encoded.
///
/// Owned by the logged-in session and immutable for its lifetime.
#[derive(Clone)]
pub struct KeyPair {
    public_key: String,
    private_key: Zeroizing<String>,
}

impl KeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        OsRng.fill_bytes(&mut bytes[..]);
        let secret = StaticSecret::from(*bytes);
        let public = PublicKey::from(&secret);

        Self {
            public_key: STANDARD.encode(public.as_bytes()),
            private_key: Zeroizing::new(STANDARD.encode(secret.to_bytes())),
        }
    }

    /// Build a key pair from stored base64 strings.
    ///
    /// No decoding happens here; malformed material surfaces later as an
    /// integrity failure when the pair is used.
    pub fn from_base64(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: Zeroizing::new(private_key.into()),
        }
    }

    /// Base64 public key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Base64 private key. Never log this.
    pub fn expose_private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"***")
            .finish()
    }
}

//! Error types.
//!
//! Every failure is terminal for the invocation; there is no partial-success
//! state. Each concern has its own enum, folded into [`Error`].

use std::fmt;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed desired-secret input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ensure that each secret has a non-empty key and value: key is empty")]
    EmptyKey,

    #[error("ensure that each secret has a non-empty key and value: value of '{0}' is empty")]
    EmptyValue(String),

    #[error("keys of secrets cannot start with a number: '{0}'")]
    LeadingDigit(String),

    #[error("expected KEY=VALUE, got '{0}'")]
    MissingSeparator(String),

    #[error("secret '{0}' is given more than once")]
    DuplicateKey(String),

    #[error("invalid environment '{0}': must be one of dev, test, staging, prod")]
    InvalidEnvironment(String),
}

/// Envelope or field authentication failures.
///
/// These sit on the security boundary and are never downgraded to warnings.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("integrity check failed: {0}")]
    Integrity(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,
}

/// Name resolution failures against the remote secret set.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretError {
    #[error("secret name(s) [{}] do not exist in your project. To see which secrets exist run `stowaway secrets`", .0.join(", "))]
    UnknownNames(Vec<String>),
}

/// The batch call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Creation,
    Modification,
    Deletion,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Creation => "creation",
            Self::Modification => "modification",
            Self::Deletion => "deletion",
        };
        f.write_str(name)
    }
}

/// A batch network call failed.
#[derive(Error, Debug)]
#[error("secret {operation} failed: {reason}")]
pub struct TransportError {
    pub operation: Operation,
    pub reason: String,
}

impl TransportError {
    pub fn new(operation: Operation, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// Workspace configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("not initialized: run `stowaway init` first")]
    NotInitialized,

    #[error("already initialized: .stowaway.toml exists")]
    AlreadyInitialized,

    #[error("store already exists at {0}")]
    StoreExists(String),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("store belongs to workspace '{actual}', expected '{expected}'")]
    WorkspaceMismatch { expected: String, actual: String },
}

/// User identity errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("no identity found at {0}: run `stowaway init` first")]
    NoIdentity(String),

    #[error("no project key envelope for {0}: ask a workspace member to add you")]
    NotAMember(String),

    #[error("invalid identity: {0}")]
    InvalidFormat(String),

    #[error("failed to read identity: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write identity: {0}")]
    WriteFailed(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

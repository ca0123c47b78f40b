//! Secret types.
//!
//! A [`SecretEntry`] is one secret as the client sees it: plaintext key and
//! value plus the sealed fields they came from. A [`SealedSecret`] is what
//! goes over the wire in a batch, and carries no plaintext.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::cipher::SealedField;
use crate::core::types::{SecretId, SecretKey};

/// Normalize a secret key for comparison, storage and hashing.
pub fn normalize_key(key: &str) -> SecretKey {
    key.to_uppercase()
}

/// Who a secret is visible to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretType {
    #[default]
    Shared,
    Personal,
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => f.write_str("shared"),
            Self::Personal => f.write_str("personal"),
        }
    }
}

/// A tag attached to a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A secret with its plaintext opened.
///
/// Identity for reconciliation is `key`, not `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEntry {
    /// Server-assigned id; empty until created.
    pub id: SecretId,
    /// Uppercase-normalized key name.
    pub key: SecretKey,
    pub value: String,
    pub sealed_key: Option<SealedField>,
    pub sealed_value: Option<SealedField>,
    pub tags: Vec<Tag>,
    pub comment: String,
    pub secret_type: SecretType,
}

impl SecretEntry {
    /// Create an untagged, uncommented shared entry. The key is normalized.
    pub fn new(id: impl Into<SecretId>, key: &str, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: normalize_key(key),
            value: value.into(),
            sealed_key: None,
            sealed_value: None,
            tags: Vec::new(),
            comment: String::new(),
            secret_type: SecretType::Shared,
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Tag slugs, sorted and deduplicated.
    pub fn tag_slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.tags.iter().map(|t| t.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        slugs
    }
}

impl fmt::Display for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Wire form of a secret inside a create or modify batch.
///
/// Creates carry a sealed key and no id; modifies carry the existing id and
/// only a new sealed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSecret {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SecretId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealed_key: Option<SealedField>,
    pub sealed_value: SealedField,
    #[serde(rename = "type")]
    pub secret_type: SecretType,
}

//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret key name (e.g., DATABASE_URL), uppercase-normalized.
pub type SecretKey = String;

/// A server-assigned secret identifier.
pub type SecretId = String;

/// A workspace (project) identifier.
pub type WorkspaceId = String;

/// An environment name (dev, test, staging, prod).
pub type Environment = String;

/// A lower-case hex SHA-256 digest.
pub type Digest = String;

//! Input validation for stowaway operations.
//!
//! Validates secret assignments and environment names before any
//! cryptographic or network work happens.

use crate::core::constants::ENVIRONMENTS;
use crate::error::{Result, ValidationError};

/// Validate a secret key name.
///
/// Keys cannot be empty and cannot start with a numeric character.
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    match key.chars().next() {
        None => Err(ValidationError::EmptyKey.into()),
        Some(first) if first.is_numeric() => {
            Err(ValidationError::LeadingDigit(key.to_string()).into())
        }
        Some(_) => Ok(()),
    }
}

/// Validate a secret value.
///
/// Secret values cannot be empty.
///
/// # Errors
///
/// Returns `ValidationError` if the value is empty.
pub fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue(key.to_string()).into());
    }

    Ok(())
}

/// Validate an environment name.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEnvironment` for anything outside
/// dev, test, staging and prod.
pub fn validate_environment(name: &str) -> Result<()> {
    if ENVIRONMENTS.contains(&name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEnvironment(name.to_string()).into())
    }
}

/// Split a `KEY=value` argument on the first `=`.
///
/// The value may itself contain `=`.
///
/// # Errors
///
/// Returns `ValidationError::MissingSeparator` if there is no `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| ValidationError::MissingSeparator(arg.to_string()).into())
}

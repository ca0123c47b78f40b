//! `${NAME}` references between secret values.
//!
//! A value may refer to another secret of the same snapshot by name
//! (case-insensitive). References to unknown names are kept verbatim, and a
//! value whose references lead back into a cycle is left as stored.

use std::collections::HashMap;

use tracing::debug;

use crate::core::domain::{normalize_key, SecretEntry};
use crate::core::types::SecretKey;

/// Expand `value`, or `None` if a reference chain loops back onto `stack`.
fn expand(value: &str, raw: &HashMap<SecretKey, String>, stack: &mut Vec<SecretKey>) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = match after.find('}') {
            Some(end) => end,
            None => {
                // unterminated, keep the tail as is
                out.push_str(&rest[start..]);
                return Some(out);
            }
        };

        let name = &after[..end];
        let key = normalize_key(name);
        match raw.get(&key) {
            Some(target) if !name.is_empty() => {
                if stack.contains(&key) {
                    return None;
                }
                stack.push(key);
                let resolved = expand(target, raw, stack);
                stack.pop();
                out.push_str(&resolved?);
            }
            _ => out.push_str(&rest[start..start + end + 3]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Some(out)
}

/// Replace `${NAME}` references in every value with the referenced value.
///
/// Only the plaintext `value` changes; sealed fields are untouched.
pub fn substitute(entries: &mut [SecretEntry]) {
    let raw: HashMap<SecretKey, String> = entries
        .iter()
        .map(|e| (normalize_key(&e.key), e.value.clone()))
        .collect();

    let mut expanded = 0;
    for entry in entries.iter_mut() {
        let mut stack = vec![normalize_key(&entry.key)];
        if let Some(value) = expand(&entry.value, &raw, &mut stack) {
            if value != entry.value {
                entry.value = value;
                expanded += 1;
            }
        }
    }

    debug!(expanded, total = entries.len(), "substituted references");
}

//! Input validation primitives.
//!
//! Provides ergonomic helpers for common validation patterns:
//! - Collecting every empty required value into one error
//! - Checking a value against an allowed-characters pattern

use crate::error::{Error, Result};
use regex::Regex;

/// Require every `(field, value)` pair to be non-empty after trimming.
///
/// All empty fields are reported together in a single missing-argument error.
pub fn require_all_present(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::validation_missing_argument(missing))
    }
}

/// Require a value to match `pattern` in full.
pub fn require_match(value: &str, pattern: &Regex, field: &str, message: &str) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(Error::validation_invalid_argument(
            field,
            message,
            Some(value.to_string()),
        ))
    }
}

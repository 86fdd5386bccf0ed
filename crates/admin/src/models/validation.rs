//! Request body validation helpers.
//!
//! Input structs deserialize every field as `Option` so that a missing field
//! is reported by name, in declaration order, instead of as an opaque serde
//! error. Each `validate()` turns an input into its typed field struct.

use std::str::FromStr;

use thiserror::Error;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// JSON name of the offending field (e.g. `imageUrl`).
    pub field: &'static str,
    /// Human readable message (e.g. `Image URL is required`).
    pub message: String,
}

impl ValidationError {
    /// A required field was absent or blank.
    #[must_use]
    pub fn required(field: &'static str, label: &str) -> Self {
        Self {
            field,
            message: format!("{label} is required"),
        }
    }

    /// A field was present but malformed.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Require a non-blank string. The value is trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::required`] when the value is absent or blank.
pub fn required_text(
    value: Option<String>,
    field: &'static str,
    label: &str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(ValidationError::required(field, label)),
    }
}

/// Require a non-blank id and parse it into its typed form.
///
/// # Errors
///
/// Returns [`ValidationError::required`] when the value is absent or blank,
/// and [`ValidationError::invalid`] when it does not parse.
pub fn required_id<T: FromStr>(
    value: Option<String>,
    field: &'static str,
    label: &str,
) -> Result<T, ValidationError> {
    let raw = required_text(value, field, label)?;
    raw.parse()
        .map_err(|_| ValidationError::invalid(field, format!("{label} is invalid")))
}

/// Keep a non-blank optional string, dropping blanks.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

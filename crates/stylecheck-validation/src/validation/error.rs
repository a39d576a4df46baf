//! Validation error types for style layer properties
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::util::unbundle::LINE_MARKER;

/// Findings raised by the property validator itself.
///
/// Errors produced by the delegated value validator carry no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyErrorKind {
    /// Property key not present in the resolved layer schema
    UnknownProperty,
    /// Token-only string where an expression was required
    UnsupportedInterpolation,
    /// `text-field` used without a style-level `glyphs` URL
    MissingGlyphsDependency,
    /// Pattern or icon property used without a style-level `sprite`
    MissingSpriteDependency,
    /// `text-font` given a legacy identity function
    UnsupportedIdentityFunction,
}

/// A single validation finding with the offending key and value
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path of the property, used for reporting only
    pub key: String,
    /// The value that failed validation
    pub value: Value,
    /// Human-readable error message
    pub message: String,
    /// Source line, when the value came from a position-tracking parser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    /// Set for findings raised by the property validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyErrorKind>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.key, self.message)
        }
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<K, M>(key: K, value: &Value, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.clone(),
            message: message.into(),
            line: value
                .as_object()
                .and_then(|object| object.get(LINE_MARKER))
                .and_then(Value::as_u64),
            kind: None,
        }
    }

    /// Tag this error with the property-level rule that raised it
    pub fn with_kind(mut self, kind: PropertyErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Result type for batch validation operations
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Multiple validation errors collected across property occurrences
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append a batch of errors, preserving order
    pub fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, errors: I) {
        self.errors.extend(errors);
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors in order
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Keep at most `max` errors
    pub fn truncate(&mut self, max: usize) {
        self.errors.truncate(max);
    }

    /// Ok if no errors were collected, Err otherwise
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_prefixes_key() {
        let error = ValidationError::new("layers[0].paint.fill-color", &json!(1), "color expected, number found");
        assert_eq!(
            error.to_string(),
            "layers[0].paint.fill-color: color expected, number found"
        );

        let bare = ValidationError::new("", &json!(1), "color expected, number found");
        assert_eq!(bare.to_string(), "color expected, number found");
    }

    #[test]
    fn test_line_marker_is_recorded() {
        let error = ValidationError::new("k", &json!({"__line__": 12, "type": "identity"}), "bad");
        assert_eq!(error.line, Some(12));

        let error = ValidationError::new("k", &json!("plain"), "bad");
        assert_eq!(error.line, None);
    }

    #[test]
    fn test_errors_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let errors = ValidationErrors::from(ValidationError::new("k", &json!(null), "bad"));
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.to_string().starts_with("1 validation error(s):"));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let error = ValidationError::new("k", &json!("x"), "bad")
            .with_kind(PropertyErrorKind::MissingSpriteDependency);
        let encoded = serde_json::to_value(&error).unwrap();
        assert_eq!(encoded["kind"], json!("missing_sprite_dependency"));
        assert!(encoded.get("line").is_none());
    }
}

//! Stylecheck Validation - property checks for map style documents
//!
//! This crate validates individual paint and layout properties of style
//! layers against a style-spec reference:
//! - **Schema resolution**: the `<paint|layout>_<layerType>` subtree is looked
//!   up; layer types without one are skipped rather than flagged
//! - **Transitions**: `*-transition` paint properties are checked against the
//!   shared transition spec
//! - **Token strings**: `"{name}"` values are rejected where an expression is
//!   expected
//! - **Companion requirements**: `text-field` needs style `glyphs`; pattern
//!   and icon properties need a style `sprite`; `text-font` refuses identity
//!   functions
//! - **Value checks**: types, ranges, enums, colors, arrays, legacy functions
//!   and expression parameters
//!
//! ## Quick Start
//!
//! ```rust
//! use stylecheck_validation::{validate_property, PropertyOccurrence, PropertyType, StyleSpec};
//! use serde_json::json;
//!
//! let reference = StyleSpec::latest().unwrap();
//! let style = json!({"version": 8, "sources": {}, "layers": []});
//! let value = json!("mypattern");
//!
//! let occurrence = PropertyOccurrence::new(&reference, &style, "fill", "fill-pattern", &value)
//!     .with_key("layers[0].paint.fill-pattern");
//! let errors = validate_property(&occurrence, PropertyType::Paint);
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(
//!     errors[0].to_string(),
//!     "layers[0].paint.fill-pattern: use of \"fill-pattern\" requires a style \"sprite\" property"
//! );
//! ```
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

pub mod reference;
pub mod util;
pub mod validation;

// Re-export commonly used types for convenience
pub use reference::{SpecError, SpecResult, StyleSpec};
pub use util::{get_type, LineTrackedLiterals, LiteralUnwrapper, PlainLiterals, ValueType};
pub use validation::{
    validate_properties_batch, validate_property, LayerType, PropertyErrorKind,
    PropertyOccurrence, PropertyType, PropertyValidator, SpecValueValidator, ValidationConfig,
    ValidationError, ValidationErrors, ValidationResult, ValueContext, ValueValidator,
};

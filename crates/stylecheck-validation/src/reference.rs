//! Read-only access to the style-spec reference document
//!
//! The reference maps `"<propertyType>_<layerType>"` keys (for example
//! `paint_symbol`) to layer schemas, and carries the shared `transition`
//! spec used by every `*-transition` paint property.
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use thiserror::Error;

use crate::validation::base::PropertyType;

// Embed the reference at compile time so validation never touches the disk
const STYLE_SPEC_V8: &str = include_str!("../../../schemas/style-spec.v8.json");

/// Result type for reference construction
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while wrapping a reference document
#[derive(Error, Debug)]
pub enum SpecError {
    /// The reference text is not valid JSON
    #[error("Failed to parse style-spec reference: {0}")]
    Json(#[from] serde_json::Error),

    /// The reference root is not a JSON object
    #[error("Style-spec reference must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// The shared transition spec is missing or malformed
    #[error("Style-spec reference has no \"transition\" object")]
    MissingTransition,
}

/// A style-spec reference document
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    root: Map<String, Value>,
}

impl StyleSpec {
    /// The bundled v8 reference
    pub fn latest() -> SpecResult<Self> {
        Self::from_json_str(STYLE_SPEC_V8)
    }

    /// Parse a reference from JSON text
    pub fn from_json_str(input: &str) -> SpecResult<Self> {
        Self::from_value(serde_json::from_str(input)?)
    }

    /// Wrap an already-parsed reference
    pub fn from_value(value: Value) -> SpecResult<Self> {
        let root = match value {
            Value::Object(root) => root,
            other => {
                return Err(SpecError::NotAnObject {
                    found: crate::util::get_type(&other).as_str(),
                })
            }
        };
        if !root.get("transition").is_some_and(Value::is_object) {
            return Err(SpecError::MissingTransition);
        }
        Ok(Self { root })
    }

    /// Schema subtree for one property category of one layer type.
    ///
    /// `None` means the layer type has no properties of that category,
    /// which callers treat as "not applicable" rather than as an error.
    pub fn layer_schema(
        &self,
        property_type: PropertyType,
        layer_type: &str,
    ) -> Option<&Map<String, Value>> {
        self.root
            .get(&format!("{}_{}", property_type, layer_type))
            .and_then(Value::as_object)
    }

    /// The shared spec for `*-transition` properties
    pub fn transition(&self) -> &Value {
        static MISSING: Value = Value::Null;
        // presence is checked in from_value
        self.root.get("transition").unwrap_or(&MISSING)
    }

    /// Look up a top-level entry, e.g. a named object spec
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Reference format version, when declared
    pub fn version(&self) -> Option<u64> {
        self.root.get("$version").and_then(Value::as_u64)
    }
}

//! Literal unwrapping
//!
//! A position-tracking JSON parser marks every object it produces with a
//! `__line__` entry. Validators work on the logical value, so the marker has
//! to be stripped before values are compared or walked. Styles parsed with a
//! plain parser carry no markers and unwrap to themselves.
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Key under which a position-tracking parser records the source line
pub const LINE_MARKER: &str = "__line__";

/// Strips parser metadata from a literal to obtain the bare value
pub trait LiteralUnwrapper {
    /// Unwrap the outermost level only
    fn unbundle<'v>(&self, value: &'v Value) -> Cow<'v, Value>;

    /// Unwrap the value and everything nested inside it
    fn deep_unbundle<'v>(&self, value: &'v Value) -> Cow<'v, Value>;
}

/// Unwrapper for values that never carry metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLiterals;

impl LiteralUnwrapper for PlainLiterals {
    fn unbundle<'v>(&self, value: &'v Value) -> Cow<'v, Value> {
        Cow::Borrowed(value)
    }

    fn deep_unbundle<'v>(&self, value: &'v Value) -> Cow<'v, Value> {
        Cow::Borrowed(value)
    }
}

/// Unwrapper for values produced by a line-tracking parser
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTrackedLiterals;

impl LiteralUnwrapper for LineTrackedLiterals {
    fn unbundle<'v>(&self, value: &'v Value) -> Cow<'v, Value> {
        match value {
            Value::Object(object) if object.contains_key(LINE_MARKER) => {
                Cow::Owned(Value::Object(without_marker(object)))
            }
            _ => Cow::Borrowed(value),
        }
    }

    fn deep_unbundle<'v>(&self, value: &'v Value) -> Cow<'v, Value> {
        if has_marker(value) {
            Cow::Owned(strip_markers(value))
        } else {
            Cow::Borrowed(value)
        }
    }
}

fn without_marker(object: &Map<String, Value>) -> Map<String, Value> {
    object
        .iter()
        .filter(|(k, _)| k.as_str() != LINE_MARKER)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn has_marker(value: &Value) -> bool {
    match value {
        Value::Object(object) => object.contains_key(LINE_MARKER) || object.values().any(has_marker),
        Value::Array(items) => items.iter().any(has_marker),
        _ => false,
    }
}

fn strip_markers(value: &Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .iter()
                .filter(|(k, _)| k.as_str() != LINE_MARKER)
                .map(|(k, v)| (k.clone(), strip_markers(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_markers).collect()),
        other => other.clone(),
    }
}

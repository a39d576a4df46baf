//! Small collaborators shared by the validators
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

pub mod color;
pub mod get_type;
pub mod properties;
pub mod unbundle;

pub use get_type::{get_type, ValueType};
pub use properties::{supports_interpolation, supports_property_expression, supports_zoom_expression};
pub use unbundle::{LineTrackedLiterals, LiteralUnwrapper, PlainLiterals};

use serde_json::Value;

/// JavaScript-style truthiness, used for optional style-level fields
/// such as `glyphs` and `sprite`.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

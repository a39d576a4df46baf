//! Runtime shape classification of JSON values
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fmt;

/// Coarse runtime category of a value, as named in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value. Total and pure.
pub fn get_type(value: &Value) -> ValueType {
    match value {
        Value::Null => ValueType::Null,
        Value::Bool(_) => ValueType::Boolean,
        Value::Number(_) => ValueType::Number,
        Value::String(_) => ValueType::String,
        Value::Array(_) => ValueType::Array,
        Value::Object(_) => ValueType::Object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_type() {
        assert_eq!(get_type(&json!(null)), ValueType::Null);
        assert_eq!(get_type(&json!(true)), ValueType::Boolean);
        assert_eq!(get_type(&json!(1.5)), ValueType::Number);
        assert_eq!(get_type(&json!("a")), ValueType::String);
        assert_eq!(get_type(&json!([1])), ValueType::Array);
        assert_eq!(get_type(&json!({"a": 1})), ValueType::Object);
        assert_eq!(ValueType::Array.to_string(), "array");
    }
}

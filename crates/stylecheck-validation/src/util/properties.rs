//! Expression capability checks on value specs
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// True when the property accepts data-driven (feature) expressions
pub fn supports_property_expression(spec: &Value) -> bool {
    matches!(
        spec.get("property-type").and_then(Value::as_str),
        Some("data-driven") | Some("cross-faded-data-driven")
    )
}

/// True when the property's expression parameters include `zoom`
pub fn supports_zoom_expression(spec: &Value) -> bool {
    expression_parameters(spec).any(|p| p == "zoom")
}

/// True when the property's expressions may interpolate between stops
pub fn supports_interpolation(spec: &Value) -> bool {
    spec.get("expression")
        .and_then(|e| e.get("interpolated"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub(crate) fn expression_parameters(spec: &Value) -> impl Iterator<Item = &str> {
    spec.get("expression")
        .and_then(|e| e.get("parameters"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_expression_support() {
        assert!(supports_property_expression(&json!({"property-type": "data-driven"})));
        assert!(supports_property_expression(&json!({"property-type": "cross-faded-data-driven"})));
        assert!(!supports_property_expression(&json!({"property-type": "data-constant"})));
        assert!(!supports_property_expression(&json!({"type": "string"})));
    }

    #[test]
    fn test_zoom_and_interpolation_support() {
        let spec = json!({"expression": {"interpolated": true, "parameters": ["zoom", "feature"]}});
        assert!(supports_zoom_expression(&spec));
        assert!(supports_interpolation(&spec));

        let ramp = json!({"expression": {"interpolated": true, "parameters": ["line-progress"]}});
        assert!(!supports_zoom_expression(&ramp));
        assert!(!supports_interpolation(&json!({"type": "number"})));
    }
}

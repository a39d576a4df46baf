//! Legacy function values
//!
//! Before expressions, data- and zoom-dependent values were written as
//! objects such as `{"type": "interval", "stops": [[0, 1], [10, 2]]}` or
//! `{"type": "identity", "property": "name"}`.
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use crate::util::{
    get_type, supports_interpolation, supports_property_expression, supports_zoom_expression,
    ValueType,
};
use crate::validation::base::ValueContext;
use crate::validation::error::ValidationError;
use serde_json::{Map, Value};

const FUNCTION_TYPES: [&str; 4] = ["identity", "exponential", "interval", "categorical"];

/// True if `value` has the shape of a legacy function: a non-array object
pub fn is_function(value: &Value) -> bool {
    value.is_object()
}

/// Structural checks for a legacy function value.
///
/// `validate_output` is applied to each stop output with the function-less
/// form of the property's spec.
pub(crate) fn validate_function<F>(
    context: &ValueContext<'_>,
    function: &Map<String, Value>,
    validate_output: F,
) -> Vec<ValidationError>
where
    F: Fn(&ValueContext<'_>) -> Vec<ValidationError>,
{
    let key = context.key;
    let value = context.value;
    let spec = context.value_spec;
    let mut errors = Vec::new();

    let is_property_function = function.contains_key("property");
    let is_zoom_function = !is_property_function;

    let function_type = match function.get("type") {
        None => {
            if supports_interpolation(spec) {
                "exponential"
            } else {
                "interval"
            }
        }
        Some(Value::String(name)) if FUNCTION_TYPES.contains(&name.as_str()) => name.as_str(),
        Some(other) => {
            errors.push(ValidationError::new(
                format!("{}.type", key),
                other,
                format!(
                    "expected one of [{}], {} found",
                    FUNCTION_TYPES.join(", "),
                    other
                ),
            ));
            return errors;
        }
    };

    if is_property_function && !supports_property_expression(spec) {
        errors.push(ValidationError::new(key, value, "property functions not supported"));
        return errors;
    }
    if is_zoom_function && !supports_zoom_expression(spec) {
        errors.push(ValidationError::new(key, value, "zoom functions not supported"));
        return errors;
    }
    if function_type == "exponential" && !supports_interpolation(spec) {
        errors.push(ValidationError::new(key, value, "exponential functions not supported"));
    }

    if function_type == "identity" {
        if is_zoom_function {
            errors.push(ValidationError::new(key, value, "missing required property \"property\""));
        }
        if function.contains_key("stops") {
            errors.push(ValidationError::new(
                key,
                value,
                "identity function may not have a \"stops\" property",
            ));
        }
        return errors;
    }

    let Some(stops) = function.get("stops") else {
        errors.push(ValidationError::new(key, value, "missing required property \"stops\""));
        return errors;
    };
    let Some(stops) = stops.as_array() else {
        errors.push(ValidationError::new(
            format!("{}.stops", key),
            stops,
            format!("array expected, {} found", get_type(stops)),
        ));
        return errors;
    };
    if stops.is_empty() {
        errors.push(ValidationError::new(
            format!("{}.stops", key),
            &Value::Array(Vec::new()),
            "array must have at least one stop",
        ));
    }

    let output_spec = output_spec(spec);
    for (i, stop) in stops.iter().enumerate() {
        let stop_key = format!("{}.stops[{}]", key, i);
        let pair = match stop.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            Some(pair) => {
                errors.push(ValidationError::new(
                    stop_key,
                    stop,
                    format!("array length 2 expected, length {} found", pair.len()),
                ));
                continue;
            }
            None => {
                errors.push(ValidationError::new(
                    stop_key,
                    stop,
                    format!("array expected, {} found", get_type(stop)),
                ));
                continue;
            }
        };

        errors.extend(validate_stop_input(&stop_key, &pair[0], is_zoom_function));

        let output_key = format!("{}[1]", stop_key);
        errors.extend(validate_output(&context.child(&output_key, &pair[1], &output_spec)));
    }

    errors
}

fn validate_stop_input(stop_key: &str, input: &Value, is_zoom_function: bool) -> Vec<ValidationError> {
    let input_key = format!("{}[0]", stop_key);
    match (get_type(input), is_zoom_function) {
        (ValueType::Number, _) => Vec::new(),
        (ValueType::Object, false) => match input.get("zoom") {
            Some(zoom) if zoom.is_number() => Vec::new(),
            Some(zoom) => vec![ValidationError::new(
                format!("{}.zoom", input_key),
                zoom,
                format!("number expected, {} found", get_type(zoom)),
            )],
            None => vec![ValidationError::new(input_key, input, "object stop key must have zoom")],
        },
        (ValueType::String, false) | (ValueType::Boolean, false) => Vec::new(),
        (found, _) => vec![ValidationError::new(
            input_key,
            input,
            format!("number expected, {} found", found),
        )],
    }
}

/// The property spec without expression support, used for stop outputs
fn output_spec(spec: &Value) -> Value {
    let mut output = spec.clone();
    if let Some(object) = output.as_object_mut() {
        object.remove("expression");
        object.remove("property-type");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::StyleSpec;
    use serde_json::json;

    fn run(spec: &Value, value: &Value) -> Vec<String> {
        let style_spec = StyleSpec::latest().unwrap();
        let style = json!({});
        let context = ValueContext::new("k", value, spec, &style, &style_spec);
        let function = value.as_object().unwrap();
        validate_function(&context, function, |output| {
            if output.value.is_number() {
                Vec::new()
            } else {
                vec![ValidationError::new(output.key, output.value, "bad output")]
            }
        })
        .into_iter()
        .map(|e| e.to_string())
        .collect()
    }

    fn data_driven() -> Value {
        json!({
            "type": "number",
            "expression": {"interpolated": true, "parameters": ["zoom", "feature"]},
            "property-type": "data-driven"
        })
    }

    #[test]
    fn test_is_function() {
        assert!(is_function(&json!({"type": "identity"})));
        assert!(!is_function(&json!(["get", "x"])));
        assert!(!is_function(&json!("x")));
    }

    #[test]
    fn test_valid_zoom_function() {
        let errors = run(&data_driven(), &json!({"stops": [[0, 1], [10, 4]]}));
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_stop_outputs_use_output_validator() {
        let errors = run(&data_driven(), &json!({"stops": [[0, 1], [10, "wide"]]}));
        assert_eq!(errors, ["k.stops[1][1]: bad output"]);
    }

    #[test]
    fn test_malformed_stops() {
        let errors = run(&data_driven(), &json!({"stops": [[0], "x"]}));
        assert_eq!(
            errors,
            [
                "k.stops[0]: array length 2 expected, length 1 found",
                "k.stops[1]: array expected, string found"
            ]
        );
    }

    #[test]
    fn test_property_function_on_constant_property() {
        let spec = json!({
            "type": "number",
            "expression": {"interpolated": true, "parameters": ["zoom"]},
            "property-type": "data-constant"
        });
        let errors = run(&spec, &json!({"property": "height", "stops": [[0, 1]]}));
        assert_eq!(errors, ["k: property functions not supported"]);
    }

    #[test]
    fn test_identity_function_rules() {
        assert!(run(&data_driven(), &json!({"type": "identity", "property": "h"})).is_empty());
        assert_eq!(
            run(&data_driven(), &json!({"type": "identity", "property": "h", "stops": []})),
            ["k: identity function may not have a \"stops\" property"]
        );
    }

    #[test]
    fn test_unknown_function_type() {
        let errors = run(&data_driven(), &json!({"type": "linear", "stops": []}));
        assert_eq!(
            errors,
            ["k.type: expected one of [identity, exponential, interval, categorical], \"linear\" found"]
        );
    }
}

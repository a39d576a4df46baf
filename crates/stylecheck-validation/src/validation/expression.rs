//! Expression recognition and parameter checks
//!
//! Only what a property may depend on is checked here (feature data,
//! feature state, zoom). Type-checking expression bodies is left to the
//! renderer's expression compiler.
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use crate::util::{supports_property_expression, supports_zoom_expression};
use crate::validation::base::{ExpressionContext, PropertyType, ValueContext};
use crate::validation::error::ValidationError;
use serde_json::Value;

/// Expression operator names, sorted for binary search
const OPERATORS: &[&str] = &[
    "!", "!=", "%", "*", "+", "-", "/", "<", "<=", "==", ">", ">=", "^", "abs", "accumulated",
    "acos", "all", "any", "array", "asin", "at", "atan", "boolean", "case", "ceil", "coalesce",
    "collator", "concat", "cos", "distance", "downcase", "e", "feature-state", "floor", "format",
    "geometry-type", "get", "has", "heatmap-density", "id", "image", "in", "index-of",
    "interpolate", "interpolate-hcl", "interpolate-lab", "is-supported-script", "length", "let",
    "line-progress", "literal", "ln", "ln2", "log10", "log2", "match", "max", "min", "number",
    "number-format", "object", "pi", "properties", "resolved-locale", "rgb", "rgba", "round",
    "sin", "slice", "sqrt", "step", "string", "tan", "to-boolean", "to-color", "to-number",
    "to-rgba", "to-string", "typeof", "upcase", "var", "within", "zoom",
];

/// True if `value` is an array whose head names a known operator
pub fn is_expression(value: &Value) -> bool {
    operator(value).is_some()
}

fn operator(value: &Value) -> Option<&str> {
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .filter(|name| OPERATORS.binary_search(name).is_ok())
}

/// What an expression reads from its evaluation environment
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Dependencies {
    feature: bool,
    feature_state: bool,
    zoom: bool,
}

impl Dependencies {
    fn collect(value: &Value, into: &mut Self) {
        let Some(name) = operator(value) else {
            return;
        };
        let Some(items) = value.as_array() else {
            return;
        };
        match name {
            "literal" => return,
            "zoom" => into.zoom = true,
            "feature-state" => into.feature_state = true,
            // two-argument forms read from an object argument instead
            "get" | "has" => into.feature |= items.len() == 2,
            "properties" | "id" | "geometry-type" | "accumulated" => into.feature = true,
            _ => {}
        }
        for item in &items[1..] {
            Self::collect(item, into);
        }
    }
}

/// Check an expression against what the property allows it to read.
///
/// Rules tied to the property type only apply in a property context.
pub(crate) fn validate_expression(context: &ValueContext<'_>) -> Vec<ValidationError> {
    let key = context.key;
    let value = context.value;
    let spec = context.value_spec;
    let mut errors = Vec::new();

    let mut deps = Dependencies::default();
    Dependencies::collect(value, &mut deps);

    let layout_property = match context.expression_context {
        Some(ExpressionContext::Property) => context.property_type == Some(PropertyType::Layout),
        None => false,
    };

    if deps.feature_state && layout_property {
        errors.push(ValidationError::new(
            key,
            value,
            "\"feature-state\" data expressions are not supported with layout properties.",
        ));
    } else if (deps.feature || deps.feature_state) && !supports_property_expression(spec) {
        errors.push(ValidationError::new(key, value, "data expressions not supported"));
    }

    if deps.zoom && !supports_zoom_expression(spec) {
        errors.push(ValidationError::new(key, value, "zoom expressions not supported"));
    }

    errors
}

//! Type-driven value validation against a reference value spec
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use crate::util::color::is_css_color;
use crate::util::unbundle::LINE_MARKER;
use crate::util::{get_type, LiteralUnwrapper, PlainLiterals, ValueType};
use crate::validation::base::{ValueContext, ValueValidator};
use crate::validation::error::ValidationError;
use crate::validation::expression::{is_expression, validate_expression};
use crate::validation::function::{is_function, validate_function};
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::trace;

/// Default [`ValueValidator`], driven by the spec's `type` field.
///
/// Values are unwrapped once with `U` and then checked recursively. Errors
/// raised against the unwrapped copy are pointed back at the original node,
/// so they carry its `__line__` like the property validator's own errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecValueValidator<U = PlainLiterals> {
    literals: U,
}

impl SpecValueValidator {
    /// Create a validator for values without parser metadata
    pub fn new() -> Self {
        Self::default()
    }
}

impl<U: LiteralUnwrapper> SpecValueValidator<U> {
    /// Create a validator that unwraps values with `literals` first
    pub fn with_literals(literals: U) -> Self {
        Self { literals }
    }
}

impl<U: LiteralUnwrapper> ValueValidator for SpecValueValidator<U> {
    fn validate(&self, context: &ValueContext<'_>) -> Vec<ValidationError> {
        match self.literals.deep_unbundle(context.value) {
            Cow::Borrowed(value) => validate_value(&context.child(context.key, value, context.value_spec)),
            Cow::Owned(value) => {
                let errors = validate_value(&context.child(context.key, &value, context.value_spec));
                errors
                    .into_iter()
                    .map(|error| with_source_position(error, context.key, context.value))
                    .collect()
            }
        }
    }
}

/// One step of an error key below the validated property
enum KeySegment<'k> {
    Member(&'k str),
    Index(usize),
}

/// Split `.name` and `[i]` steps off a key suffix; `None` if it is not one
fn key_segments(mut path: &str) -> Option<Vec<KeySegment<'_>>> {
    let mut segments = Vec::new();
    while !path.is_empty() {
        if let Some(rest) = path.strip_prefix('.') {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            segments.push(KeySegment::Member(&rest[..end]));
            path = &rest[end..];
        } else if let Some(rest) = path.strip_prefix('[') {
            let end = rest.find(']')?;
            segments.push(KeySegment::Index(rest[..end].parse().ok()?));
            path = &rest[end + 1..];
        } else {
            return None;
        }
    }
    Some(segments)
}

fn marker_line(value: &Value) -> Option<u64> {
    value.get(LINE_MARKER).and_then(Value::as_u64)
}

/// Re-anchor `error` on the marked node its key names below `root_key`.
///
/// The line is the node's own marker, else the closest enclosing one.
fn with_source_position(mut error: ValidationError, root_key: &str, root: &Value) -> ValidationError {
    let Some(segments) = error.key.strip_prefix(root_key).and_then(key_segments) else {
        return error;
    };

    let mut node = Some(root);
    let mut line = marker_line(root);
    for segment in segments {
        node = node.and_then(|current| match segment {
            KeySegment::Member(name) => current.get(name),
            KeySegment::Index(i) => current.get(i),
        });
        match node {
            Some(current) => line = marker_line(current).or(line),
            None => break,
        }
    }

    if let Some(original) = node {
        error.value = original.clone();
    }
    error.line = error.line.or(line);
    error
}

fn validate_value(context: &ValueContext<'_>) -> Vec<ValidationError> {
    let spec = context.value_spec;
    let value = context.value;

    if spec.get("expression").is_some() {
        if let Some(function) = value.as_object().filter(|_| is_function(value)) {
            return validate_function(context, function, validate_value);
        }
        if is_expression(value) {
            return validate_expression(context);
        }
    }

    match spec.get("type").and_then(Value::as_str) {
        Some("number") => validate_number(context),
        Some("string") => expect_type(context, ValueType::String),
        Some("boolean") => expect_type(context, ValueType::Boolean),
        Some("color") => validate_color(context),
        Some("enum") => validate_enum(context),
        Some("array") => validate_array(context),
        Some("formatted") | Some("resolvedImage") => validate_string_or_expression(context),
        Some("*") => Vec::new(),
        Some(named) => match context.style_spec.get(named).and_then(Value::as_object) {
            Some(element_specs) => validate_object(context, element_specs),
            None => {
                trace!(value_type = named, "no validator for value type");
                Vec::new()
            }
        },
        None => match spec.as_object() {
            Some(element_specs) => validate_object(context, element_specs),
            None => Vec::new(),
        },
    }
}

fn expect_type(context: &ValueContext<'_>, expected: ValueType) -> Vec<ValidationError> {
    let found = get_type(context.value);
    if found == expected {
        Vec::new()
    } else {
        vec![type_mismatch(context, expected.as_str(), found)]
    }
}

fn type_mismatch(context: &ValueContext<'_>, expected: &str, found: ValueType) -> ValidationError {
    ValidationError::new(
        context.key,
        context.value,
        format!("{} expected, {} found", expected, found),
    )
}

fn validate_number(context: &ValueContext<'_>) -> Vec<ValidationError> {
    let Some(number) = context.value.as_f64() else {
        return vec![type_mismatch(context, "number", get_type(context.value))];
    };
    let spec = context.value_spec;
    let mut errors = Vec::new();

    if let Some(minimum) = spec.get("minimum").filter(|m| m.as_f64().is_some_and(|m| number < m)) {
        errors.push(ValidationError::new(
            context.key,
            context.value,
            format!("{} is less than the minimum value {}", context.value, minimum),
        ));
    }
    if let Some(maximum) = spec.get("maximum").filter(|m| m.as_f64().is_some_and(|m| number > m)) {
        errors.push(ValidationError::new(
            context.key,
            context.value,
            format!("{} is greater than the maximum value {}", context.value, maximum),
        ));
    }
    errors
}

fn validate_color(context: &ValueContext<'_>) -> Vec<ValidationError> {
    match context.value.as_str() {
        None => vec![type_mismatch(context, "color", get_type(context.value))],
        Some(text) if is_css_color(text) => Vec::new(),
        Some(_) => vec![ValidationError::new(
            context.key,
            context.value,
            format!("color expected, {} found", context.value),
        )],
    }
}

fn validate_enum(context: &ValueContext<'_>) -> Vec<ValidationError> {
    let value = context.value;
    let (allowed, names): (bool, Vec<String>) = match context.value_spec.get("values") {
        Some(Value::Object(values)) => (
            value.as_str().is_some_and(|v| values.contains_key(v)),
            values.keys().cloned().collect(),
        ),
        Some(Value::Array(values)) => (
            values.contains(value),
            values
                .iter()
                .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned))
                .collect(),
        ),
        _ => (false, Vec::new()),
    };

    if allowed {
        Vec::new()
    } else {
        vec![ValidationError::new(
            context.key,
            value,
            format!("expected one of [{}], {} found", names.join(", "), value),
        )]
    }
}

fn validate_array(context: &ValueContext<'_>) -> Vec<ValidationError> {
    let Some(items) = context.value.as_array() else {
        return vec![type_mismatch(context, "array", get_type(context.value))];
    };
    let spec = context.value_spec;

    if let Some(length) = spec.get("length").and_then(Value::as_u64) {
        if items.len() as u64 != length {
            return vec![ValidationError::new(
                context.key,
                context.value,
                format!("array length {} expected, length {} found", length, items.len()),
            )];
        }
    }

    let Some(element_spec) = element_spec(spec) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let item_key = format!("{}[{}]", context.key, i);
            validate_value(&context.child(&item_key, item, &element_spec))
        })
        .collect()
}

/// Spec for the elements of an array-typed spec
fn element_spec(array_spec: &Value) -> Option<Value> {
    let element_type = array_spec.get("value")?;
    let mut spec = Map::new();
    spec.insert("type".to_owned(), element_type.clone());
    for field in ["values", "minimum", "maximum"] {
        if let Some(v) = array_spec.get(field) {
            spec.insert(field.to_owned(), v.clone());
        }
    }
    Some(Value::Object(spec))
}

fn validate_string_or_expression(context: &ValueContext<'_>) -> Vec<ValidationError> {
    if context.value.is_string() {
        Vec::new()
    } else if is_expression(context.value) && context.value_spec.get("expression").is_some() {
        validate_expression(context)
    } else {
        vec![type_mismatch(context, "string", get_type(context.value))]
    }
}

fn validate_object(context: &ValueContext<'_>, element_specs: &Map<String, Value>) -> Vec<ValidationError> {
    let Some(object) = context.value.as_object() else {
        return vec![type_mismatch(context, "object", get_type(context.value))];
    };
    let mut errors = Vec::new();

    for (name, member) in object {
        let Some(member_spec) = element_specs.get(name).or_else(|| element_specs.get("*")) else {
            errors.push(ValidationError::new(
                context.key,
                member,
                format!("unknown property \"{}\"", name),
            ));
            continue;
        };
        let member_key = if context.key.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", context.key, name)
        };
        errors.extend(validate_value(&context.child(&member_key, member, member_spec)));
    }

    for (name, member_spec) in element_specs {
        let required = member_spec.get("required").and_then(Value::as_bool).unwrap_or(false);
        if required && member_spec.get("default").is_none() && !object.contains_key(name) {
            errors.push(ValidationError::new(
                context.key,
                context.value,
                format!("missing required property \"{}\"", name),
            ));
        }
    }

    errors
}

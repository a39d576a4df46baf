//! Paint and layout property validation
//!
//! Resolves the reference entry for one layer property, applies the rules
//! that depend on the property's identity (transitions, token strings,
//! style-level companions) and hands the remaining structural checks to a
//! [`ValueValidator`].
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use crate::util::{is_truthy, supports_property_expression, LiteralUnwrapper, PlainLiterals};
use crate::validation::base::{
    LayerType, PropertyOccurrence, PropertyType, SpritePatternProperty, ValueContext, ValueValidator,
};
use crate::validation::error::{PropertyErrorKind, ValidationError};
use crate::validation::function::is_function;
use crate::validation::value::SpecValueValidator;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, trace};

static TRANSITION_KEY: OnceLock<Regex> = OnceLock::new();
static TOKEN_STRING: OnceLock<Regex> = OnceLock::new();

fn transition_key() -> &'static Regex {
    TRANSITION_KEY.get_or_init(|| Regex::new(r"^(.*)-transition$").expect("transition pattern is valid"))
}

fn token_string() -> &'static Regex {
    TOKEN_STRING.get_or_init(|| Regex::new(r"^\{([^}]+)\}$").expect("token pattern is valid"))
}

/// Validates individual layer properties
#[derive(Debug, Clone, Default)]
pub struct PropertyValidator<V = SpecValueValidator, U = PlainLiterals> {
    values: V,
    literals: U,
}

impl PropertyValidator {
    /// Validator backed by [`SpecValueValidator`] over plain values
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: ValueValidator, U: LiteralUnwrapper> PropertyValidator<V, U> {
    /// Validator with a custom value checker and literal unwrapper
    pub fn with_collaborators(values: V, literals: U) -> Self {
        Self { values, literals }
    }

    /// Validate one property occurrence.
    ///
    /// Returns every applicable error. An empty list means the property is
    /// valid, or that the layer type has no `property_type` properties at all.
    pub fn validate(
        &self,
        occurrence: &PropertyOccurrence<'_>,
        property_type: PropertyType,
    ) -> Vec<ValidationError> {
        let key = occurrence.key;
        let value = occurrence.value;
        let property_key = occurrence.object_key;

        let Some(layer_schema) = occurrence
            .style_spec
            .layer_schema(property_type, occurrence.layer_type)
        else {
            trace!(
                layer_type = occurrence.layer_type,
                property_type = %property_type,
                "no schema for layer type, skipping"
            );
            return Vec::new();
        };

        if property_type == PropertyType::Paint {
            let transitionable_base = transition_key()
                .captures(property_key)
                .and_then(|captures| captures.get(1))
                .and_then(|base| layer_schema.get(base.as_str()))
                .is_some_and(|base_spec| is_truthy(base_spec.get("transition")));
            if transitionable_base {
                trace!(property = property_key, "validating as transition");
                let context = ValueContext::new(
                    key,
                    value,
                    occurrence.style_spec.transition(),
                    occurrence.style,
                    occurrence.style_spec,
                );
                return self.values.validate(&context);
            }
        }

        let Some(value_spec) = occurrence
            .value_spec
            .or_else(|| layer_schema.get(property_key))
        else {
            debug!(
                layer_type = occurrence.layer_type,
                property = property_key,
                "unknown property"
            );
            return vec![ValidationError::new(
                key,
                value,
                format!("unknown property \"{}\"", property_key),
            )
            .with_kind(PropertyErrorKind::UnknownProperty)];
        };

        if let Some(token) = self.interpolation_token(value, value_spec) {
            debug!(property = property_key, "token interpolation in expression property");
            let suggestion = serde_json::to_string(&token).unwrap_or_default();
            return vec![ValidationError::new(
                key,
                value,
                format!(
                    "\"{}\" does not support interpolation syntax\n\
                     Use an identity property function instead: \
                     `{{ \"type\": \"identity\", \"property\": {} }}`.",
                    property_key, suggestion
                ),
            )
            .with_kind(PropertyErrorKind::UnsupportedInterpolation)];
        }

        let mut errors = self.companion_errors(occurrence);

        let context = ValueContext::new(
            key,
            value,
            value_spec,
            occurrence.style,
            occurrence.style_spec,
        )
        .for_property(property_type, property_key);
        errors.extend(self.values.validate(&context));

        trace!(property = property_key, errors = errors.len(), "property validated");
        errors
    }

    /// The referenced feature property, if `value` is a bare `{token}` string
    /// given to a property that expects expressions instead.
    fn interpolation_token(&self, value: &Value, value_spec: &Value) -> Option<String> {
        if !supports_property_expression(value_spec) || is_truthy(value_spec.get("tokens")) {
            return None;
        }
        let value = self.literals.unbundle(value);
        let text = value.as_str()?;
        token_string()
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|token| token.as_str().to_owned())
    }

    /// Requirements a property places on the rest of the style document
    fn companion_errors(&self, occurrence: &PropertyOccurrence<'_>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let Some(layer_type) = LayerType::from_name(occurrence.layer_type) else {
            return errors;
        };
        let key = occurrence.key;
        let value = occurrence.value;
        let property_key = occurrence.object_key;
        // a missing style document disables the companion checks
        let style = (!occurrence.style.is_null()).then_some(occurrence.style);

        if layer_type == LayerType::Symbol {
            if property_key == "text-field" && style.is_some_and(|s| !is_truthy(s.get("glyphs"))) {
                errors.push(
                    ValidationError::new(
                        key,
                        value,
                        "use of \"text-field\" requires a style \"glyphs\" property",
                    )
                    .with_kind(PropertyErrorKind::MissingGlyphsDependency),
                );
            }
            if property_key == "text-font" && self.is_identity_function(value) {
                errors.push(
                    ValidationError::new(key, value, "\"text-font\" does not support identity functions")
                        .with_kind(PropertyErrorKind::UnsupportedIdentityFunction),
                );
            }
        }

        if layer_type.draws_from_sprite() {
            if let Some(pattern) = SpritePatternProperty::from_key(property_key) {
                if style.is_some_and(|s| !is_truthy(s.get("sprite"))) {
                    errors.push(
                        ValidationError::new(
                            key,
                            value,
                            format!("use of \"{}\" requires a style \"sprite\" property", pattern.key()),
                        )
                        .with_kind(PropertyErrorKind::MissingSpriteDependency),
                    );
                }
            }
        }

        errors
    }

    fn is_identity_function(&self, value: &Value) -> bool {
        if !is_function(&self.literals.deep_unbundle(value)) {
            return false;
        }
        value
            .get("type")
            .map(|function_type| self.literals.unbundle(function_type))
            .is_some_and(|function_type| function_type.as_str() == Some("identity"))
    }
}

/// Validate one property occurrence with the default collaborators
pub fn validate_property(
    occurrence: &PropertyOccurrence<'_>,
    property_type: PropertyType,
) -> Vec<ValidationError> {
    PropertyValidator::new().validate(occurrence, property_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::StyleSpec;
    use crate::util::LineTrackedLiterals;
    use serde_json::json;
    use std::cell::RefCell;

    /// Records every delegated call and reports one canned error per call
    #[derive(Default)]
    struct RecordingValidator {
        calls: RefCell<Vec<(String, Value, Option<PropertyType>, Option<String>)>>,
    }

    impl ValueValidator for RecordingValidator {
        fn validate(&self, context: &ValueContext<'_>) -> Vec<ValidationError> {
            self.calls.borrow_mut().push((
                context.key.to_owned(),
                context.value_spec.clone(),
                context.property_type,
                context.property_key.map(str::to_owned),
            ));
            vec![ValidationError::new(context.key, context.value, "delegated")]
        }
    }

    fn reference() -> StyleSpec {
        StyleSpec::from_value(json!({
            "transition": {"duration": {"type": "number"}, "delay": {"type": "number"}},
            "paint_line": {
                "line-width": {"type": "number", "transition": true, "property-type": "data-driven"},
                "line-pattern": {"type": "resolvedImage", "property-type": "cross-faded-data-driven"}
            },
            "layout_symbol": {
                "text-field": {"type": "formatted", "property-type": "data-driven"},
                "icon-image": {"type": "resolvedImage", "tokens": true, "property-type": "data-driven"},
                "text-font": {"type": "array", "value": "string", "property-type": "data-driven"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_transition_delegates_to_shared_spec_only() {
        let spec = reference();
        let style = json!({});
        let value = json!({"duration": 100});
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, PlainLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "line", "line-width-transition", &value);
        let errors = validator.validate(&occurrence, PropertyType::Paint);

        assert_eq!(errors.len(), 1);
        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(&calls[0].1, spec.transition());
        assert_eq!(calls[0].2, None);
        assert_eq!(calls[0].3, None);
    }

    #[test]
    fn test_delegation_carries_property_identity() {
        let spec = reference();
        let style = json!({"sprite": "mapbox://sprites/x"});
        let value = json!("dash");
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, PlainLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "line", "line-pattern", &value)
            .with_key("layers[0].paint.line-pattern");
        let errors = validator.validate(&occurrence, PropertyType::Paint);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "delegated");
        let calls = recorder.calls.borrow();
        assert_eq!(calls[0].0, "layers[0].paint.line-pattern");
        assert_eq!(calls[0].2, Some(PropertyType::Paint));
        assert_eq!(calls[0].3.as_deref(), Some("line-pattern"));
    }

    #[test]
    fn test_companion_errors_precede_delegated_errors() {
        let spec = reference();
        let style = json!({});
        let value = json!("dash");
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, PlainLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "line", "line-pattern", &value);
        let errors = validator.validate(&occurrence, PropertyType::Paint);

        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "use of \"line-pattern\" requires a style \"sprite\" property",
                "delegated"
            ]
        );
        assert_eq!(errors[0].kind, Some(PropertyErrorKind::MissingSpriteDependency));
        assert_eq!(errors[1].kind, None);
    }

    #[test]
    fn test_value_spec_override_wins() {
        let spec = reference();
        let style = json!({});
        let value = json!(1);
        let override_spec = json!({"type": "number"});
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, PlainLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "line", "line-made-up", &value)
            .with_value_spec(&override_spec);
        validator.validate(&occurrence, PropertyType::Paint);

        assert_eq!(recorder.calls.borrow()[0].1, override_spec);
    }

    #[test]
    fn test_tokens_allowed_when_spec_declares_them() {
        let spec = reference();
        let style = json!({"sprite": "s"});
        let value = json!("{icon}");
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, PlainLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "symbol", "icon-image", &value);
        let errors = validator.validate(&occurrence, PropertyType::Layout);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "delegated");
    }

    #[test]
    fn test_null_style_skips_companion_checks() {
        let spec = reference();
        let style = Value::Null;
        let value = json!("Hello");
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, PlainLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "symbol", "text-field", &value);
        let errors = validator.validate(&occurrence, PropertyType::Layout);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "delegated");
    }

    #[test]
    fn test_identity_detection_through_line_markers() {
        let spec = reference();
        let style = json!({"glyphs": "g"});
        let value = json!({"__line__": 7, "type": "identity", "property": "font"});
        let recorder = RecordingValidator::default();
        let validator = PropertyValidator::with_collaborators(&recorder, LineTrackedLiterals);

        let occurrence = PropertyOccurrence::new(&spec, &style, "symbol", "text-font", &value);
        let errors = validator.validate(&occurrence, PropertyType::Layout);

        assert_eq!(errors[0].kind, Some(PropertyErrorKind::UnsupportedIdentityFunction));
        assert_eq!(errors[0].line, Some(7));
    }

    #[test]
    fn test_token_pattern_is_anchored() {
        assert!(token_string().is_match("{name}"));
        assert!(!token_string().is_match("{name} street"));
        assert!(!token_string().is_match("{}"));
        assert!(!token_string().is_match("x{name}"));

        assert!(transition_key().is_match("line-width-transition"));
        assert!(!transition_key().is_match("line-width-transition-x"));
    }
}

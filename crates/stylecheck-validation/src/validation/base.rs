//! Shared validation types and the value-validator seam
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use crate::reference::StyleSpec;
use crate::validation::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Category of a layer property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Visual properties, evaluated per frame
    Paint,
    /// Placement and geometry properties
    Layout,
}

impl PropertyType {
    /// Reference subtree prefix, `paint` or `layout`
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Paint => "paint",
            PropertyType::Layout => "layout",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layer types with property rules beyond their schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Background,
    Fill,
    FillExtrusion,
    Line,
    Symbol,
    Circle,
    Heatmap,
    Raster,
    Hillshade,
}

impl LayerType {
    pub const ALL: [LayerType; 9] = [
        LayerType::Background,
        LayerType::Fill,
        LayerType::FillExtrusion,
        LayerType::Line,
        LayerType::Symbol,
        LayerType::Circle,
        LayerType::Heatmap,
        LayerType::Raster,
        LayerType::Hillshade,
    ];

    /// Parse a layer `type` string. Unrecognised names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.name() == name)
    }

    /// The layer `type` string for this variant
    pub fn name(self) -> &'static str {
        match self {
            LayerType::Background => "background",
            LayerType::Fill => "fill",
            LayerType::FillExtrusion => "fill-extrusion",
            LayerType::Line => "line",
            LayerType::Symbol => "symbol",
            LayerType::Circle => "circle",
            LayerType::Heatmap => "heatmap",
            LayerType::Raster => "raster",
            LayerType::Hillshade => "hillshade",
        }
    }

    /// Whether pattern and icon properties of this layer type resolve
    /// their images from the style's sprite.
    pub fn draws_from_sprite(self) -> bool {
        match self {
            LayerType::Background
            | LayerType::Fill
            | LayerType::FillExtrusion
            | LayerType::Line
            | LayerType::Symbol => true,
            LayerType::Circle | LayerType::Heatmap | LayerType::Raster | LayerType::Hillshade => {
                false
            }
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Properties whose values name images in the style's sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpritePatternProperty {
    BackgroundPattern,
    FillPattern,
    FillExtrusionPattern,
    LinePattern,
    IconImage,
}

impl SpritePatternProperty {
    pub const ALL: [SpritePatternProperty; 5] = [
        SpritePatternProperty::BackgroundPattern,
        SpritePatternProperty::FillPattern,
        SpritePatternProperty::FillExtrusionPattern,
        SpritePatternProperty::LinePattern,
        SpritePatternProperty::IconImage,
    ];

    /// Look up a property by name
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|property| property.key() == key)
    }

    /// The property name
    pub fn key(self) -> &'static str {
        match self {
            SpritePatternProperty::BackgroundPattern => "background-pattern",
            SpritePatternProperty::FillPattern => "fill-pattern",
            SpritePatternProperty::FillExtrusionPattern => "fill-extrusion-pattern",
            SpritePatternProperty::LinePattern => "line-pattern",
            SpritePatternProperty::IconImage => "icon-image",
        }
    }
}

/// Where an expression appears, which decides what it may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionContext {
    /// Value of a paint or layout property
    Property,
}

/// One property of one layer, as found by the document walker
#[derive(Debug, Clone, Copy)]
pub struct PropertyOccurrence<'a> {
    /// Dotted path used in error messages, e.g. `layers[2].paint.fill-color`
    pub key: &'a str,
    /// The whole style document
    pub style: &'a Value,
    /// The reference the style is validated against
    pub style_spec: &'a StyleSpec,
    /// The property value
    pub value: &'a Value,
    /// The property name, e.g. `text-field`
    pub object_key: &'a str,
    /// The owning layer's `type`
    pub layer_type: &'a str,
    /// Caller-supplied spec that replaces the reference lookup
    pub value_spec: Option<&'a Value>,
}

impl<'a> PropertyOccurrence<'a> {
    /// Occurrence keyed by the bare property name
    pub fn new(
        style_spec: &'a StyleSpec,
        style: &'a Value,
        layer_type: &'a str,
        object_key: &'a str,
        value: &'a Value,
    ) -> Self {
        Self {
            key: object_key,
            style,
            style_spec,
            value,
            object_key,
            layer_type,
            value_spec: None,
        }
    }

    /// Set the reporting path
    pub fn with_key(mut self, key: &'a str) -> Self {
        self.key = key;
        self
    }

    /// Validate against `value_spec` instead of the reference entry
    pub fn with_value_spec(mut self, value_spec: &'a Value) -> Self {
        self.value_spec = Some(value_spec);
        self
    }
}

/// Input to a [`ValueValidator`]
#[derive(Debug, Clone, Copy)]
pub struct ValueContext<'a> {
    /// Reporting path of `value`
    pub key: &'a str,
    pub value: &'a Value,
    pub value_spec: &'a Value,
    pub style: &'a Value,
    pub style_spec: &'a StyleSpec,
    /// Set for layer property values; property-type rules on expressions
    /// only apply here
    pub expression_context: Option<ExpressionContext>,
    pub property_type: Option<PropertyType>,
    pub property_key: Option<&'a str>,
}

impl<'a> ValueContext<'a> {
    /// Context for a value outside any property
    pub fn new(
        key: &'a str,
        value: &'a Value,
        value_spec: &'a Value,
        style: &'a Value,
        style_spec: &'a StyleSpec,
    ) -> Self {
        Self {
            key,
            value,
            value_spec,
            style,
            style_spec,
            expression_context: None,
            property_type: None,
            property_key: None,
        }
    }

    /// Mark the value as a layer property, enabling property expressions
    pub fn for_property(mut self, property_type: PropertyType, property_key: &'a str) -> Self {
        self.expression_context = Some(ExpressionContext::Property);
        self.property_type = Some(property_type);
        self.property_key = Some(property_key);
        self
    }

    /// Context for a nested value, keeping the property information
    pub fn child<'b>(&self, key: &'b str, value: &'b Value, value_spec: &'b Value) -> ValueContext<'b>
    where
        'a: 'b,
    {
        ValueContext {
            key,
            value,
            value_spec,
            style: self.style,
            style_spec: self.style_spec,
            expression_context: self.expression_context,
            property_type: self.property_type,
            property_key: self.property_key,
        }
    }
}

/// Checks a value against an arbitrary value spec, regardless of which
/// property it belongs to.
///
/// Implementations must not mutate the style or the reference and must
/// be safe to call concurrently over shared documents.
pub trait ValueValidator {
    fn validate(&self, context: &ValueContext<'_>) -> Vec<ValidationError>;
}

impl<T: ValueValidator + ?Sized> ValueValidator for &T {
    fn validate(&self, context: &ValueContext<'_>) -> Vec<ValidationError> {
        (**self).validate(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_type_names_round_trip() {
        for layer in LayerType::ALL {
            assert_eq!(LayerType::from_name(layer.name()), Some(layer));
        }
        assert_eq!(LayerType::from_name("custom"), None);
        assert_eq!(LayerType::FillExtrusion.to_string(), "fill-extrusion");
    }

    #[test]
    fn test_sprite_layers() {
        let sprite_layers: Vec<_> = LayerType::ALL
            .into_iter()
            .filter(|layer| layer.draws_from_sprite())
            .map(LayerType::name)
            .collect();
        assert_eq!(
            sprite_layers,
            ["background", "fill", "fill-extrusion", "line", "symbol"]
        );
    }

    #[test]
    fn test_sprite_pattern_keys() {
        assert_eq!(
            SpritePatternProperty::from_key("fill-extrusion-pattern"),
            Some(SpritePatternProperty::FillExtrusionPattern)
        );
        assert_eq!(SpritePatternProperty::from_key("fill-color"), None);
        assert_eq!(SpritePatternProperty::from_key("icon-image-transition"), None);
    }

    #[test]
    fn test_property_type_display() {
        assert_eq!(PropertyType::Paint.to_string(), "paint");
        assert_eq!(PropertyType::Layout.as_str(), "layout");
    }
}

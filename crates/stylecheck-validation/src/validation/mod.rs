//! Validation of style layer properties
//!
//! The entry point is [`validate_property`], called once per paint or layout
//! property found while walking a style document. It resolves the property's
//! spec in the reference, applies the rules tied to the property's identity
//! and delegates structural checks to a [`ValueValidator`].
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod expression;
pub mod function;
pub mod property;
pub mod value;

// Re-export commonly used types
pub use base::{
    ExpressionContext, LayerType, PropertyOccurrence, PropertyType, SpritePatternProperty,
    ValueContext, ValueValidator,
};
pub use error::{PropertyErrorKind, ValidationError, ValidationErrors, ValidationResult};
pub use expression::is_expression;
pub use function::is_function;
pub use property::{validate_property, PropertyValidator};
pub use value::SpecValueValidator;

use crate::util::LiteralUnwrapper;
use tracing::debug;

/// Configuration for batch validation
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Stop after the first occurrence that produced errors
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl ValidationConfig {
    /// Collect every error from every occurrence
    pub fn exhaustive() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

impl<V: ValueValidator, U: LiteralUnwrapper> PropertyValidator<V, U> {
    /// Validate several occurrences, concatenating their errors in order.
    ///
    /// Each occurrence is validated completely; the configuration only
    /// limits how many occurrences are visited and how many errors are kept.
    pub fn validate_batch(
        &self,
        occurrences: &[(PropertyOccurrence<'_>, PropertyType)],
        config: &ValidationConfig,
    ) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for (occurrence, property_type) in occurrences {
            let found = self.validate(occurrence, *property_type);
            if found.is_empty() {
                continue;
            }
            errors.extend(found);

            if config.max_errors > 0 && errors.len() >= config.max_errors {
                errors.truncate(config.max_errors);
                debug!(max_errors = config.max_errors, "error limit reached");
                break;
            }
            if config.fail_fast {
                break;
            }
        }

        errors.into_result()
    }
}

/// Batch validation with the default collaborators
pub fn validate_properties_batch(
    occurrences: &[(PropertyOccurrence<'_>, PropertyType)],
    config: &ValidationConfig,
) -> ValidationResult<()> {
    PropertyValidator::new().validate_batch(occurrences, config)
}

//! # Validator Trait and Registry
//!
//! This module defines the trait for semantic validators and provides
//! a registry system for running several of them over one model.

use sharpcheck_compiler_diagnostics::{DiagnosticCollection, DiagnosticSink, VecSink};
use tracing::debug;

use super::ValidationContext;

/// Trait for semantic validators
pub trait Validator {
    /// Validate the model and push findings to the sink
    fn validate(&self, ctx: &ValidationContext<'_>, sink: &dyn DiagnosticSink);

    /// Get the name of this validator (for debugging/logging)
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Registry for managing multiple validators
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator to the registry
    pub fn add_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Run all validators and collect diagnostics, sorted by location
    pub fn validate_all(&self, ctx: &ValidationContext<'_>) -> DiagnosticCollection {
        let sink = VecSink::new();

        for validator in &self.validators {
            let before = sink.len();
            validator.validate(ctx, &sink);
            debug!(
                "[{}] {} diagnostics for {}",
                validator.name(),
                sink.len() - before,
                ctx.file_path()
            );
        }

        let mut collection = sink.into_collection();
        collection.sort();
        collection
    }

    /// Get the number of registered validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Create the registry with every rule family
pub fn create_default_registry() -> ValidatorRegistry {
    ValidatorRegistry::new()
        .add_validator(super::ModifierValidator)
        .add_validator(super::RequiredMemberValidator)
        .add_validator(super::StaticAbstractValidator)
        .add_validator(super::LocalFunctionValidator)
}

//! # Validator Contract
//!
//! Entities validate their payload before construction and before every
//! update. The validator is an injected capability: anything implementing
//! [`ValidatorFields`] can be plugged in.
//!
//! [`ClassValidatorFields`] is the stock implementation. It runs the rules
//! declared with `#[derive(validator::Validate)]` on the payload type and
//! groups the failures per field.

use crate::error::DomainError;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Field name to the ordered list of messages for that field.
pub type FieldsErrors = BTreeMap<String, Vec<String>>;

/// Synchronous validation contract.
///
/// Every call to [`validate`](ValidatorFields::validate) must start from a
/// clean slate: errors and validated data from a previous call are never
/// carried over.
pub trait ValidatorFields<T> {
    /// Validates `data`, returning `true` when it is accepted.
    fn validate(&mut self, data: &T) -> bool;

    /// Errors from the last call, empty when it succeeded.
    fn errors(&self) -> &FieldsErrors;

    /// The accepted payload from the last call, `None` when it failed.
    fn validated_data(&self) -> Option<&T>;
}

/// Validator backed by the `validator` crate's derive rules.
#[derive(Debug)]
pub struct ClassValidatorFields<T> {
    errors: FieldsErrors,
    validated_data: Option<T>,
}

impl<T> Default for ClassValidatorFields<T> {
    fn default() -> Self {
        Self {
            errors: FieldsErrors::new(),
            validated_data: None,
        }
    }
}

impl<T> ClassValidatorFields<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Validate + Clone> ValidatorFields<T> for ClassValidatorFields<T> {
    fn validate(&mut self, data: &T) -> bool {
        self.errors.clear();
        self.validated_data = None;

        match data.validate() {
            Ok(()) => {
                self.validated_data = Some(data.clone());
                true
            }
            Err(errors) => {
                self.errors = collect_field_errors(&errors);
                false
            }
        }
    }

    fn errors(&self) -> &FieldsErrors {
        &self.errors
    }

    fn validated_data(&self) -> Option<&T> {
        self.validated_data.as_ref()
    }
}

/// Runs `validator` and turns a rejection into
/// [`DomainError::EntityValidation`].
pub fn ensure_valid<T, V>(validator: &mut V, data: &T) -> Result<(), DomainError>
where
    V: ValidatorFields<T>,
{
    if validator.validate(data) {
        Ok(())
    } else {
        Err(DomainError::EntityValidation(validator.errors().clone()))
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> FieldsErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, failures)| {
            let messages = failures.iter().map(message_of).collect();
            (field.to_string(), messages)
        })
        .collect()
}

// Rules without a custom message fall back to their code (e.g. "length").
fn message_of(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}

#![forbid(unsafe_code)]

//! Pluggable per-field validation.
//!
//! A field normally evaluates its configured checks. Hosts that need a rule
//! the checks cannot express install a [`FieldValidator`] instead.

use fieldcheck_core::{CheckSet, PhoneContext, ValidationResult, evaluate_with};

/// Everything a validator may look at.
#[derive(Debug)]
pub struct ValidationInput<'a> {
    pub text: &'a str,
    pub checks: &'a CheckSet,
    pub phone: Option<PhoneContext<'a>>,
}

/// Produces the validation result for a field.
pub trait FieldValidator {
    fn validate(&self, input: &ValidationInput<'_>) -> ValidationResult;
}

impl<F> FieldValidator for F
where
    F: Fn(&ValidationInput<'_>) -> ValidationResult,
{
    fn validate(&self, input: &ValidationInput<'_>) -> ValidationResult {
        self(input)
    }
}

/// The built-in validator: evaluates the configured checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckValidator;

impl FieldValidator for CheckValidator {
    fn validate(&self, input: &ValidationInput<'_>) -> ValidationResult {
        evaluate_with(input.text, input.checks, input.phone.as_ref())
    }
}

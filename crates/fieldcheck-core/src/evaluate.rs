#![forbid(unsafe_code)]

//! Check evaluation.
//!
//! [`evaluate`] is a pure function of the text and the configured checks.
//! Checks run in their fixed precedence and the first failure wins, so the
//! iteration order of the underlying set never leaks into the result.

use std::sync::LazyLock;

use regex::Regex;

use crate::capability::PhoneContext;
use crate::check::{Check, CheckSet};
use crate::result::ValidationResult;
use crate::text::grapheme_count;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.[A-Za-z]{2}[A-Za-z]*$").expect("email pattern is a valid regex")
});

/// Evaluate `text` against `checks` with no phone capability attached.
///
/// A `PhoneNumber` check always reports `Malformed` in this configuration.
#[must_use]
pub fn evaluate(text: &str, checks: &CheckSet) -> ValidationResult {
    evaluate_with(text, checks, None)
}

/// Evaluate `text` against `checks`, validating phone numbers through `phone`.
#[must_use]
pub fn evaluate_with(
    text: &str,
    checks: &CheckSet,
    phone: Option<&PhoneContext<'_>>,
) -> ValidationResult {
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("fieldcheck.evaluate", checks = checks.len()).entered();

    if checks.is_empty() {
        return ValidationResult::Valid;
    }

    // Blank input is reported as Empty before any format failure.
    if text.is_empty() && (checks.contains(&Check::NotEmpty) || checks.has_format_check()) {
        return ValidationResult::Empty;
    }

    let length = grapheme_count(text);

    for check in checks.in_precedence_order() {
        let outcome = match check {
            Check::NotEmpty if length == 0 => Some(ValidationResult::Empty),
            Check::MinimumLength(min_length) if length < *min_length => {
                Some(ValidationResult::TooShort {
                    length,
                    min_length: *min_length,
                })
            }
            Check::MaximumLength(max_length) if length > *max_length => {
                Some(ValidationResult::TooLong {
                    length,
                    max_length: *max_length,
                })
            }
            Check::Email if !is_valid_email(text) => Some(ValidationResult::Malformed),
            Check::PhoneNumber if !is_valid_phone(text, phone) => Some(ValidationResult::Malformed),
            Check::LuhnChecksum if !is_valid_luhn(text) => Some(ValidationResult::Malformed),
            Check::MinimumValue(min_value) => match parse_value(text) {
                Some(value) if value >= *min_value => None,
                parsed => Some(ValidationResult::TooLow {
                    value: parsed.unwrap_or(0),
                    min_value: *min_value,
                }),
            },
            Check::MaximumValue(max_value) => match parse_value(text) {
                Some(value) if value <= *max_value => None,
                parsed => Some(ValidationResult::TooHigh {
                    value: parsed.unwrap_or(0),
                    max_value: *max_value,
                }),
            },
            Check::MatchesOther(target) => match target.read() {
                Some(other) if other == text => None,
                _ => Some(ValidationResult::Mismatch),
            },
            _ => None,
        };

        if let Some(failure) = outcome {
            return failure;
        }
    }

    ValidationResult::Valid
}

/// Whether `text` looks like an e-mail address.
///
/// Non-whitespace, `@`, non-whitespace, `.`, then at least two letters.
#[must_use]
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

/// Luhn mod-10 checksum over `text`.
///
/// Every character must be an ASCII digit. Reading right to left, every
/// second digit is doubled and the digits of doubled values above 9 are
/// summed. The total must be a multiple of 10.
#[must_use]
pub fn is_valid_luhn(text: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in text.chars().rev().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 { doubled - 9 } else { doubled }
        } else {
            digit
        };
    }
    sum % 10 == 0
}

/// Parse `text` as a plain integer. `None` on any parse failure.
#[must_use]
pub fn parse_value(text: &str) -> Option<i64> {
    text.parse().ok()
}

fn is_valid_phone(text: &str, phone: Option<&PhoneContext<'_>>) -> bool {
    phone.is_some_and(|ctx| ctx.service.is_valid(text, ctx.region))
}

#![forbid(unsafe_code)]

//! The outcome of evaluating a field.

use std::fmt;

// ---------------------------------------------------------------------------
// Result codes (for i18n lookup)
// ---------------------------------------------------------------------------

/// Code for a field that has not been evaluated yet.
pub const CODE_NOT_VALIDATED: &str = "not_validated";
/// Code for a field that passed every check.
pub const CODE_VALID: &str = "valid";
/// Code for empty text.
pub const CODE_EMPTY: &str = "empty";
/// Code for text below the minimum length.
pub const CODE_TOO_SHORT: &str = "too_short";
/// Code for text above the maximum length.
pub const CODE_TOO_LONG: &str = "too_long";
/// Code for a value below the minimum.
pub const CODE_TOO_LOW: &str = "too_low";
/// Code for a value above the maximum.
pub const CODE_TOO_HIGH: &str = "too_high";
/// Code for text in the wrong shape.
pub const CODE_MALFORMED: &str = "malformed";
/// Code for text that differs from the field it must match.
pub const CODE_MISMATCH: &str = "mismatch";

/// The result of one evaluation.
///
/// Failures are ordinary outcomes, not errors. Exactly one result is produced
/// per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationResult {
    /// Nothing has been evaluated since the last reset or reconfiguration.
    #[default]
    NotValidated,
    Valid,
    Empty,
    TooShort { length: usize, min_length: usize },
    TooLong { length: usize, max_length: usize },
    /// `value` is 0 when the text did not parse as an integer.
    TooLow { value: i64, min_value: i64 },
    /// `value` is 0 when the text did not parse as an integer.
    TooHigh { value: i64, max_value: i64 },
    Malformed,
    Mismatch,
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` for every outcome that is neither `Valid` nor `NotValidated`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Valid | Self::NotValidated)
    }

    /// Returns `true` if nothing has been evaluated.
    #[must_use]
    pub fn is_not_validated(&self) -> bool {
        matches!(self, Self::NotValidated)
    }

    /// Stable code for programmatic handling and i18n.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotValidated => CODE_NOT_VALIDATED,
            Self::Valid => CODE_VALID,
            Self::Empty => CODE_EMPTY,
            Self::TooShort { .. } => CODE_TOO_SHORT,
            Self::TooLong { .. } => CODE_TOO_LONG,
            Self::TooLow { .. } => CODE_TOO_LOW,
            Self::TooHigh { .. } => CODE_TOO_HIGH,
            Self::Malformed => CODE_MALFORMED,
            Self::Mismatch => CODE_MISMATCH,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotValidated => write!(f, "Not validated"),
            Self::Valid => write!(f, "Valid"),
            Self::Empty => write!(f, "This field is required"),
            Self::TooShort { length, min_length } => {
                write!(f, "Must be at least {min_length} characters (got {length})")
            }
            Self::TooLong { length, max_length } => {
                write!(f, "Must be at most {max_length} characters (got {length})")
            }
            Self::TooLow { value, min_value } => {
                write!(f, "Must be at least {min_value} (got {value})")
            }
            Self::TooHigh { value, max_value } => {
                write!(f, "Must be at most {max_value} (got {value})")
            }
            Self::Malformed => write!(f, "Invalid format"),
            Self::Mismatch => write!(f, "Does not match"),
        }
    }
}

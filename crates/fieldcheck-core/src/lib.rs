#![forbid(unsafe_code)]

//! Core: field checks, evaluation, input gating, and display-state rules.
//!
//! Everything here is a pure function or a plain value. The stateful
//! per-field engine lives in the `fieldcheck` crate.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck_core::{Check, CheckSet, ValidationResult, evaluate};
//!
//! let checks: CheckSet = [Check::NotEmpty, Check::MinimumLength(3)].into_iter().collect();
//! assert_eq!(evaluate("", &checks), ValidationResult::Empty);
//! assert_eq!(
//!     evaluate("ab", &checks),
//!     ValidationResult::TooShort { length: 2, min_length: 3 }
//! );
//! assert!(evaluate("abc", &checks).is_valid());
//! ```

pub mod capability;
pub mod check;
pub mod config;
pub mod display;
pub mod evaluate;
pub mod gate;
pub mod result;
pub mod text;

pub use capability::{
    DecimalSeparator, FixedSeparator, NationalNumber, PhoneContext, PhoneNumberService, SharedText,
    TextSource,
};
pub use check::{Check, CheckSet, MatchTarget};
pub use config::{ConfigError, FieldConfig};
pub use display::{
    DisplayState, FieldEvent, TriggerOptions, clear_invalid, derive_display_state,
    reset_on_editing_began,
};
pub use evaluate::{evaluate, evaluate_with, is_valid_email, is_valid_luhn, parse_value};
pub use gate::{
    CURRENCY_DECIMAL_PLACES, EditRange, GateRejection, ProposedEdit, gate_verdict, input_gate,
};
pub use result::ValidationResult;

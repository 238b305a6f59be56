#![forbid(unsafe_code)]

//! Fieldcheck public crate.
//!
//! [`ValidatingField`] wraps the pure rules from `fieldcheck-core` in a
//! stateful per-field engine: memoized evaluation, the input gate, display
//! state transitions, phone formatting and change observers.
//!
//! ```
//! use fieldcheck::prelude::*;
//!
//! let mut field = ValidatingField::new();
//! field
//!     .configure(FieldConfig::new().with_check(Check::NotEmpty))
//!     .unwrap();
//!
//! assert_eq!(field.validate(), ValidationResult::Empty);
//! assert_eq!(field.display_state(), DisplayState::Invalid);
//!
//! field.set_text("hello");
//! assert!(field.validate().is_valid());
//! ```

pub mod field;
pub mod locale;
pub mod observer;
pub mod phone;
pub mod validator;

// --- Engine ----------------------------------------------------------------

pub use field::ValidatingField;
pub use locale::LocaleSeparator;
pub use observer::{FieldChange, Observers, SubscriptionId};
pub use phone::{RegionRule, format_for_display, placeholder_hint};
pub use validator::{CheckValidator, FieldValidator, ValidationInput};

// --- Core re-exports -------------------------------------------------------

pub use fieldcheck_core::{
    Check, CheckSet, ConfigError, DecimalSeparator, DisplayState, EditRange, FieldConfig,
    FieldEvent, FixedSeparator, GateRejection, MatchTarget, NationalNumber, PhoneContext,
    PhoneNumberService, SharedText, TextSource, TriggerOptions, ValidationResult,
};

pub use fieldcheck_core as core;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Check, CheckSet, DisplayState, EditRange, FieldConfig, FieldEvent, FieldValidator,
        FixedSeparator, MatchTarget, TriggerOptions, ValidatingField, ValidationResult,
    };
}

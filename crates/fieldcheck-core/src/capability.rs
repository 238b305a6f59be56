#![forbid(unsafe_code)]

//! External capabilities the rules depend on.
//!
//! None of these are implemented here. Phone-number handling is an optional
//! plugin, other-field text is read through [`TextSource`], and the locale's
//! decimal separator comes from a [`DecimalSeparator`] provider.

use std::cell::RefCell;
use std::fmt;

// ---------------------------------------------------------------------------
// Phone numbers
// ---------------------------------------------------------------------------

/// A national phone number parsed out of an international one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalNumber {
    /// The number rendered in national format.
    pub text: String,
    /// Region code the number belongs to (e.g. `"za"`).
    pub region: String,
}

/// Region-aware phone-number validation and formatting.
///
/// Only the first three methods are required. The formatting hooks default to
/// "unsupported", in which case the field leaves its text untouched.
pub trait PhoneNumberService {
    /// Whether `text` is a valid number for `region`.
    fn is_valid(&self, text: &str, region: &str) -> bool;

    /// Strip everything but the dialable characters.
    fn normalize(&self, text: &str) -> String;

    /// An example mobile number for `region` in national format.
    fn example_number(&self, region: &str) -> Option<String>;

    /// Re-render normalized digits the way they should look while typing.
    fn format_as_you_type(&self, _digits: &str, _region: &str) -> Option<String> {
        None
    }

    /// Render `text` in E.164 form.
    fn format_e164(&self, _text: &str, _region: &str) -> Option<String> {
        None
    }

    /// Parse an international number into national text and its region.
    fn parse_international(&self, _text: &str) -> Option<NationalNumber> {
        None
    }

    /// Fixed length of a formatted national number for `region`, if any.
    fn national_length(&self, _region: &str) -> Option<usize> {
        None
    }
}

/// A phone service bound to the region it validates against.
pub struct PhoneContext<'a> {
    pub service: &'a dyn PhoneNumberService,
    pub region: &'a str,
}

impl fmt::Debug for PhoneContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneContext")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Other-field text
// ---------------------------------------------------------------------------

/// Read access to another field's live text.
pub trait TextSource {
    /// The text as it is right now.
    fn current_text(&self) -> String;
}

/// Interior-mutable text cell that can be shared with dependent fields.
#[derive(Debug, Default)]
pub struct SharedText(RefCell<String>);

impl SharedText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(RefCell::new(text.into()))
    }

    /// Replace the stored text.
    pub fn set(&self, text: impl Into<String>) {
        *self.0.borrow_mut() = text.into();
    }

    /// Run `f` against the stored text without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl TextSource for SharedText {
    fn current_text(&self) -> String {
        self.0.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Decimal separator
// ---------------------------------------------------------------------------

/// Supplies the decimal separator used by currency gating.
pub trait DecimalSeparator {
    fn decimal_separator(&self) -> String;
}

/// A separator fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSeparator(pub String);

impl FixedSeparator {
    /// `"."`
    #[must_use]
    pub fn period() -> Self {
        Self(".".to_string())
    }

    /// `","`
    #[must_use]
    pub fn comma() -> Self {
        Self(",".to_string())
    }
}

impl Default for FixedSeparator {
    fn default() -> Self {
        Self::period()
    }
}

impl DecimalSeparator for FixedSeparator {
    fn decimal_separator(&self) -> String {
        self.0.clone()
    }
}

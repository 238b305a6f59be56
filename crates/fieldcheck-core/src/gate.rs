#![forbid(unsafe_code)]

//! Pre-edit input gating.
//!
//! The gate decides whether a proposed edit may be applied before the text
//! changes. It is independent of evaluation: `Numeric` and `Currency` checks
//! only act here, while the hard length limit rejects input outright instead
//! of reporting `TooLong` afterwards.

use std::fmt;

use crate::check::{Check, CheckSet};
use crate::text::{grapheme_byte_offset, grapheme_count};

/// Most digits allowed after a currency decimal separator.
pub const CURRENCY_DECIMAL_PLACES: usize = 2;

/// A span of the current text being replaced, in grapheme clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EditRange {
    /// First replaced grapheme.
    pub location: usize,
    /// Number of replaced graphemes.
    pub length: usize,
}

impl EditRange {
    #[must_use]
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// An empty range at `location` (pure insertion).
    #[must_use]
    pub const fn insertion(location: usize) -> Self {
        Self::new(location, 0)
    }

    /// One past the last replaced grapheme.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }
}

/// Why the gate refused an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateRejection {
    /// The range reaches past the end of the current text.
    RangeOutOfBounds,
    /// The result would exceed the hard length limit.
    HardMaxLength,
    /// A numeric field received something other than digits.
    NonDigit,
    /// A currency field received a character that is neither a digit nor the separator.
    InvalidCurrencyCharacter,
    /// A currency amount would start with the decimal separator.
    LeadingSeparator,
    /// A currency amount would contain more than one separator.
    ExtraSeparator,
    /// A currency amount would gain more than two decimal places.
    TooManyDecimals,
}

impl GateRejection {
    /// Short rule name for logs.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            Self::RangeOutOfBounds => "range",
            Self::HardMaxLength => "hard_max_length",
            Self::NonDigit => "numeric",
            Self::InvalidCurrencyCharacter
            | Self::LeadingSeparator
            | Self::ExtraSeparator
            | Self::TooManyDecimals => "currency",
        }
    }
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::RangeOutOfBounds => "edit range is outside the text",
            Self::HardMaxLength => "text would exceed the length limit",
            Self::NonDigit => "only digits are allowed",
            Self::InvalidCurrencyCharacter => "only digits and the decimal separator are allowed",
            Self::LeadingSeparator => "amount cannot start with the decimal separator",
            Self::ExtraSeparator => "amount can contain only one decimal separator",
            Self::TooManyDecimals => "amount can have at most two decimal places",
        };
        f.write_str(msg)
    }
}

/// A proposed edit: replace `range` of `current` with `replacement`.
#[derive(Debug, Clone, Copy)]
pub struct ProposedEdit<'a> {
    pub current: &'a str,
    pub range: EditRange,
    pub replacement: &'a str,
}

impl<'a> ProposedEdit<'a> {
    #[must_use]
    pub fn new(current: &'a str, range: EditRange, replacement: &'a str) -> Self {
        Self {
            current,
            range,
            replacement,
        }
    }

    /// Removes text and inserts nothing.
    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.replacement.is_empty() && self.range.length > 0
    }

    /// The text after applying the edit. `None` if the range is out of bounds.
    #[must_use]
    pub fn apply(&self) -> Option<String> {
        if self.range.end() > grapheme_count(self.current) {
            return None;
        }
        let start = grapheme_byte_offset(self.current, self.range.location);
        let end = grapheme_byte_offset(self.current, self.range.end());
        let mut out = String::with_capacity(self.current.len() + self.replacement.len());
        out.push_str(&self.current[..start]);
        out.push_str(self.replacement);
        out.push_str(&self.current[end..]);
        Some(out)
    }
}

/// Decide whether `edit` may be applied.
///
/// Deletions pass every content filter. `decimal_separator` is only consulted
/// when a `Numeric` or `Currency` check is configured.
pub fn gate_verdict(
    edit: &ProposedEdit<'_>,
    checks: &CheckSet,
    hard_max_length: usize,
    decimal_separator: &str,
) -> Result<(), GateRejection> {
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!(
        "fieldcheck.gate",
        location = edit.range.location,
        length = edit.range.length
    )
    .entered();

    let current_len = grapheme_count(edit.current);
    if edit.range.end() > current_len {
        return Err(GateRejection::RangeOutOfBounds);
    }
    if edit.is_deletion() {
        return Ok(());
    }

    if checks.contains(&Check::Currency) {
        check_currency(edit, decimal_separator)?;
    }
    if checks.contains(&Check::Numeric) {
        check_numeric(edit.replacement, decimal_separator)?;
    }
    if hard_max_length > 0 {
        let new_len = current_len - edit.range.length + grapheme_count(edit.replacement);
        if new_len > hard_max_length {
            return Err(GateRejection::HardMaxLength);
        }
    }
    Ok(())
}

/// Boolean form of [`gate_verdict`].
#[must_use]
pub fn input_gate(
    current: &str,
    range: EditRange,
    replacement: &str,
    checks: &CheckSet,
    hard_max_length: usize,
    decimal_separator: &str,
) -> bool {
    gate_verdict(
        &ProposedEdit::new(current, range, replacement),
        checks,
        hard_max_length,
        decimal_separator,
    )
    .is_ok()
}

fn check_numeric(replacement: &str, separator: &str) -> Result<(), GateRejection> {
    let all_digits = if separator.is_empty() {
        replacement.chars().all(|c| c.is_ascii_digit())
    } else {
        replacement
            .split(separator)
            .all(|part| part.chars().all(|c| c.is_ascii_digit()))
    };
    if all_digits {
        Ok(())
    } else {
        Err(GateRejection::NonDigit)
    }
}

fn check_currency(edit: &ProposedEdit<'_>, separator: &str) -> Result<(), GateRejection> {
    if separator.is_empty() {
        return check_numeric(edit.replacement, separator)
            .map_err(|_| GateRejection::InvalidCurrencyCharacter);
    }

    if edit.range.location == 0 && edit.replacement.starts_with(separator) {
        return Err(GateRejection::LeadingSeparator);
    }
    if edit
        .replacement
        .split(separator)
        .any(|part| !part.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(GateRejection::InvalidCurrencyCharacter);
    }

    let Some(result) = edit.apply() else {
        return Err(GateRejection::RangeOutOfBounds);
    };
    if result.matches(separator).count() > 1 {
        return Err(GateRejection::ExtraSeparator);
    }

    // Only refuse edits that add decimal places, so over-long text set
    // programmatically can still be edited before the separator.
    let after = decimal_places(&result, separator);
    if after > CURRENCY_DECIMAL_PLACES && after > decimal_places(edit.current, separator) {
        return Err(GateRejection::TooManyDecimals);
    }
    Ok(())
}

fn decimal_places(text: &str, separator: &str) -> usize {
    text.split_once(separator)
        .map_or(0, |(_, decimals)| grapheme_count(decimals))
}

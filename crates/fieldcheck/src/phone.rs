#![forbid(unsafe_code)]

//! Phone capability integration.
//!
//! The engine owns the phone service. These helpers keep the formatting and
//! region rules out of the field state machine.

use fieldcheck_core::{Check, CheckSet, PhoneNumberService};

/// Normalize `text` and re-render it with the service's as-you-type formatter.
///
/// `None` means the text should stay as it is: nothing dialable was found or
/// the service has no formatter.
#[must_use]
pub fn format_for_display(
    service: &dyn PhoneNumberService,
    text: &str,
    region: &str,
) -> Option<String> {
    let digits = service.normalize(text);
    if digits.is_empty() {
        return None;
    }
    service.format_as_you_type(&digits, region)
}

/// Placeholder hint built from the region's example number.
#[must_use]
pub fn placeholder_hint(service: &dyn PhoneNumberService, region: &str) -> Option<String> {
    service
        .example_number(region)
        .map(|example| format!("e.g. {example}"))
}

/// Length limits a region imposes on a phone field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionRule {
    /// Fixed national length, applied as both minimum and hard limit.
    pub national_length: Option<usize>,
}

impl RegionRule {
    #[must_use]
    pub fn for_region(service: &dyn PhoneNumberService, region: &str) -> Self {
        Self {
            national_length: service.national_length(region),
        }
    }

    /// Undo this rule's additions. Returns the hard limit to restore.
    pub fn retract(&self, checks: &mut CheckSet, hard_max_length: usize) -> usize {
        match self.national_length {
            Some(n) => {
                checks.remove(&Check::MinimumLength(n));
                if hard_max_length == n { 0 } else { hard_max_length }
            }
            None => hard_max_length,
        }
    }

    /// Apply this rule. Returns the new hard limit.
    pub fn apply(&self, checks: &mut CheckSet, hard_max_length: usize) -> usize {
        match self.national_length {
            Some(n) => {
                checks.insert(Check::MinimumLength(n));
                n
            }
            None => hard_max_length,
        }
    }
}

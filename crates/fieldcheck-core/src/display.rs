#![forbid(unsafe_code)]

//! Display-state derivation.
//!
//! The display state is what the host renders (border, text colour, trailing
//! icon). It is never stored on its own terms: every transition goes through
//! [`derive_display_state`] or [`reset_on_editing_began`], from the last
//! result, the configured [`TriggerOptions`] and the triggering [`FieldEvent`].
//!
//! ```text
//!            ┌──────────── ExplicitRequest / Automatic* ────────────┐
//!            ▼                                                      │
//!        Default ◄──── editing began (ClearInvalidOnEditingBegin) ─ Invalid
//!            │                                                      ▲
//!            └────────────────► Valid ◄─────────────────────────────┘
//! ```

use bitflags::bitflags;

use crate::result::ValidationResult;

bitflags! {
    /// When automatic validation surfaces visually.
    ///
    /// `on_editing_changed(true)` sets both the base flag and its
    /// show-invalid companion, so "present with either flag value" is a test
    /// of the base bit alone.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TriggerOptions: u8 {
        /// Validate whenever the text changes while editing.
        const EDITING_CHANGED              = 0b0000_0001;
        /// Show invalid status automatically on text change.
        const EDITING_CHANGED_SHOW_INVALID = 0b0000_0011;
        /// Validate when editing ends.
        const EDITING_ENDED                = 0b0000_0100;
        /// Show invalid status automatically when editing ends.
        const EDITING_ENDED_SHOW_INVALID   = 0b0000_1100;
        /// Drop an invalid display when editing begins.
        const CLEAR_INVALID_ON_BEGIN       = 0b0001_0000;
        /// Never show a valid display unless explicitly requested.
        const SUPPRESS_VALID               = 0b0010_0000;
    }
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self::empty()
    }
}

impl TriggerOptions {
    /// `OnEditingChanged(autoShowInvalid)`.
    #[must_use]
    pub const fn on_editing_changed(auto_show_invalid: bool) -> Self {
        if auto_show_invalid {
            Self::EDITING_CHANGED_SHOW_INVALID
        } else {
            Self::EDITING_CHANGED
        }
    }

    /// `OnEditingEnded(autoShowInvalid)`.
    #[must_use]
    pub const fn on_editing_ended(auto_show_invalid: bool) -> Self {
        if auto_show_invalid {
            Self::EDITING_ENDED_SHOW_INVALID
        } else {
            Self::EDITING_ENDED
        }
    }

    /// The flags governing `event`: (validates on it, shows invalid on it).
    fn trigger_for(self, event: FieldEvent) -> Option<(bool, bool)> {
        let (base, show_invalid) = match event {
            FieldEvent::AutomaticEditingChanged => {
                (Self::EDITING_CHANGED, Self::EDITING_CHANGED_SHOW_INVALID)
            }
            FieldEvent::AutomaticEditingEnded => {
                (Self::EDITING_ENDED, Self::EDITING_ENDED_SHOW_INVALID)
            }
            FieldEvent::ExplicitRequest | FieldEvent::AutomaticNoChange => return None,
        };
        Some((self.contains(base), self.contains(show_invalid)))
    }
}

/// Visual validity state of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayState {
    #[default]
    Default,
    Valid,
    Invalid,
}

/// What caused a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    /// The host asked for validation (e.g. on submit).
    ExplicitRequest,
    /// A status read with no editing activity.
    AutomaticNoChange,
    /// The text changed while editing.
    AutomaticEditingChanged,
    /// Editing finished.
    AutomaticEditingEnded,
}

impl FieldEvent {
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        !matches!(self, Self::ExplicitRequest)
    }
}

/// Derive the display state after a validation pass.
///
/// `current` is returned whenever the event leaves the display unchanged.
#[must_use]
pub fn derive_display_state(
    current: DisplayState,
    result: ValidationResult,
    options: TriggerOptions,
    event: FieldEvent,
) -> DisplayState {
    let suppress_valid = options.contains(TriggerOptions::SUPPRESS_VALID);

    if event == FieldEvent::ExplicitRequest {
        return match (result.is_valid(), suppress_valid) {
            (true, false) => DisplayState::Valid,
            (true, true) => DisplayState::Default,
            (false, _) => DisplayState::Invalid,
        };
    }

    let Some((validates, show_invalid)) = options.trigger_for(event) else {
        return current;
    };

    if result.is_valid() {
        if validates && !suppress_valid {
            DisplayState::Valid
        } else {
            current
        }
    } else if show_invalid {
        DisplayState::Invalid
    } else if validates {
        DisplayState::Default
    } else {
        current
    }
}

/// Reset applied when editing begins: `Invalid` drops to `Default` if the
/// options ask for it. Evaluation is bypassed entirely.
#[must_use]
pub fn reset_on_editing_began(current: DisplayState, options: TriggerOptions) -> DisplayState {
    if options.contains(TriggerOptions::CLEAR_INVALID_ON_BEGIN) {
        clear_invalid(current)
    } else {
        current
    }
}

/// `Invalid` becomes `Default`; other states are kept.
#[must_use]
pub fn clear_invalid(current: DisplayState) -> DisplayState {
    if current == DisplayState::Invalid {
        DisplayState::Default
    } else {
        current
    }
}

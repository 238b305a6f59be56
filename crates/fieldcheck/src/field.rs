#![forbid(unsafe_code)]

//! The per-field validation engine.
//!
//! A [`ValidatingField`] owns one field's text, configuration, last result
//! and display state. It is single-owner and neither `Send` nor `Sync`: hosts
//! that touch a field from several tasks must route every call through one
//! owner.
//!
//! # Memoization
//!
//! Evaluation is skipped when neither the text nor any `MatchesOther` target
//! has changed since the last evaluation and a result is cached. A skipped
//! evaluation always returns what a fresh one would.

use std::fmt;
use std::rc::Rc;

use fieldcheck_core::{
    Check, CheckSet, ConfigError, DecimalSeparator, DisplayState, EditRange, FieldConfig,
    FieldEvent, MatchTarget, PhoneContext, PhoneNumberService, ProposedEdit, SharedText,
    ValidationResult, clear_invalid, derive_display_state, gate_verdict, reset_on_editing_began,
};

use crate::locale::LocaleSeparator;
use crate::observer::{FieldChange, Observers, SubscriptionId};
use crate::phone::{RegionRule, format_for_display, placeholder_hint};
use crate::validator::{CheckValidator, FieldValidator, ValidationInput};

/// Inputs the cached result was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    text: String,
    match_texts: Vec<Option<String>>,
}

/// A validating text field, minus the UI.
pub struct ValidatingField {
    text: Rc<SharedText>,
    config: FieldConfig,
    result: ValidationResult,
    display: DisplayState,
    memo: Option<MemoKey>,
    validator: Option<Box<dyn FieldValidator>>,
    phone: Option<Rc<dyn PhoneNumberService>>,
    separator: Box<dyn DecimalSeparator>,
    region_rule: RegionRule,
    placeholder: Option<String>,
    ignore_input: bool,
    observers: Observers,
}

impl Default for ValidatingField {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingField")
            .field("text", &self.text)
            .field("config", &self.config)
            .field("result", &self.result)
            .field("display", &self.display)
            .field("custom_validator", &self.validator.is_some())
            .field("phone_service", &self.phone.is_some())
            .field("ignore_input", &self.ignore_input)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl ValidatingField {
    /// Create an unconfigured field using the system decimal separator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: Rc::new(SharedText::default()),
            config: FieldConfig::default(),
            result: ValidationResult::NotValidated,
            display: DisplayState::Default,
            memo: None,
            validator: None,
            phone: None,
            separator: Box::new(LocaleSeparator::system()),
            region_rule: RegionRule::default(),
            placeholder: None,
            ignore_input: false,
            observers: Observers::new(),
        }
    }

    // --- Builder methods ---

    /// Attach a phone service (builder).
    #[must_use]
    pub fn with_phone_service(mut self, service: Rc<dyn PhoneNumberService>) -> Self {
        self.phone = Some(service);
        self
    }

    /// Use a specific decimal separator provider (builder).
    #[must_use]
    pub fn with_decimal_separator(mut self, separator: impl DecimalSeparator + 'static) -> Self {
        self.separator = Box::new(separator);
        self
    }

    /// Replace check evaluation with a custom validator (builder).
    #[must_use]
    pub fn with_validator(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Set the initial text (builder).
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.text.set(text);
        self
    }

    // --- Configuration ---

    /// Apply a configuration.
    ///
    /// On success the cached result is discarded. On failure every violation
    /// is returned and the previous configuration stays in place.
    pub fn configure(&mut self, config: FieldConfig) -> Result<(), Vec<ConfigError>> {
        if let Err(errors) = config.validate(self.phone.is_some()) {
            for error in &errors {
                tracing::warn!(field = error.field(), %error, "field configuration rejected");
            }
            return Err(errors);
        }

        let region = config.phone_region.clone();
        self.config = config;
        self.region_rule = RegionRule::default();
        self.placeholder = None;
        tracing::debug!(
            checks = self.config.checks.len(),
            options = ?self.config.options,
            hard_max_length = self.config.hard_max_length,
            "field configured"
        );
        match region {
            Some(region) => self.set_phone_region(region),
            None => self.invalidate(),
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[must_use]
    pub fn checks(&self) -> &CheckSet {
        &self.config.checks
    }

    /// Attach or detach the phone service.
    ///
    /// Detaching while a `PhoneNumber` check is configured leaves the check
    /// failing as `Malformed`.
    pub fn set_phone_service(&mut self, service: Option<Rc<dyn PhoneNumberService>>) {
        self.phone = service;
        self.invalidate();
    }

    /// Install or remove a custom validator.
    pub fn set_validator(&mut self, validator: Option<Box<dyn FieldValidator>>) {
        self.validator = validator;
        self.invalidate();
    }

    /// Stop (or resume) accepting any input through the gate.
    pub fn set_ignore_input(&mut self, ignore: bool) {
        self.ignore_input = ignore;
    }

    #[must_use]
    pub fn ignores_input(&self) -> bool {
        self.ignore_input
    }

    // --- Text ---

    /// Replace the text. Does not evaluate.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text.set(text);
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.with(str::to_owned)
    }

    /// Live handle to this field's text, for other fields' `MatchesOther`.
    #[must_use]
    pub fn text_source(&self) -> Rc<SharedText> {
        Rc::clone(&self.text)
    }

    /// Placeholder hint derived from the phone region, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    // --- Input gate ---

    /// Whether replacing `range` with `replacement` may go ahead.
    #[must_use]
    pub fn input_gate(&self, range: EditRange, replacement: &str) -> bool {
        if self.ignore_input {
            tracing::trace!("input ignored");
            return false;
        }
        let separator = self.separator.decimal_separator();
        let verdict = self.text.with(|current| {
            gate_verdict(
                &ProposedEdit::new(current, range, replacement),
                &self.config.checks,
                self.config.hard_max_length,
                &separator,
            )
        });
        match verdict {
            Ok(()) => true,
            Err(rejection) => {
                tracing::trace!(rule = rejection.rule(), reason = %rejection, "input rejected");
                false
            }
        }
    }

    /// Gate an edit and apply it if accepted. Does not evaluate.
    pub fn apply_edit(&mut self, range: EditRange, replacement: &str) -> bool {
        if !self.input_gate(range, replacement) {
            return false;
        }
        let edited = self
            .text
            .with(|current| ProposedEdit::new(current, range, replacement).apply());
        match edited {
            Some(text) => {
                self.text.set(text);
                true
            }
            None => false,
        }
    }

    // --- Evaluation ---

    /// Evaluate the current text. `force` bypasses the memoized result.
    pub fn evaluate(&mut self, force: bool) -> ValidationResult {
        let result = self.compute(force);
        self.commit(result, self.display);
        result
    }

    /// Run a validation pass for `event` and update the display state.
    pub fn handle_event(&mut self, event: FieldEvent) -> DisplayState {
        let result = self.compute(false);
        let display = derive_display_state(self.display, result, self.config.options, event);
        self.commit(result, display);
        display
    }

    /// Explicit validation, e.g. on submit.
    pub fn validate(&mut self) -> ValidationResult {
        self.handle_event(FieldEvent::ExplicitRequest);
        self.result
    }

    /// Current result after an automatic, no-change validation pass.
    pub fn status(&mut self) -> ValidationResult {
        self.handle_event(FieldEvent::AutomaticNoChange);
        self.result
    }

    /// Editing began: clears an invalid display if configured to.
    pub fn editing_began(&mut self) -> DisplayState {
        let display = reset_on_editing_began(self.display, self.config.options);
        self.commit(self.result, display);
        display
    }

    /// Clear an invalid display regardless of configuration.
    pub fn reset_invalid(&mut self) {
        self.commit(self.result, clear_invalid(self.display));
    }

    /// Back to `Default` and `NotValidated`.
    pub fn reset(&mut self) {
        self.memo = None;
        self.commit(ValidationResult::NotValidated, DisplayState::Default);
    }

    /// Last computed result, without evaluating.
    #[must_use]
    pub fn result(&self) -> ValidationResult {
        self.result
    }

    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        self.display
    }

    // --- Observers ---

    /// Observe result and display changes.
    pub fn subscribe(&mut self, callback: impl Fn(&FieldChange) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Phone ---

    /// Switch the phone region: placeholder, length rule and cached result.
    pub fn set_phone_region(&mut self, region: impl Into<String>) {
        let region = region.into();
        let mut checks = self.config.checks.clone();
        let mut hard_max = self.region_rule.retract(&mut checks, self.config.hard_max_length);

        if let Some(service) = &self.phone {
            self.placeholder = placeholder_hint(service.as_ref(), &region);
            self.region_rule = RegionRule::for_region(service.as_ref(), &region);
            hard_max = self.region_rule.apply(&mut checks, hard_max);
        } else {
            self.placeholder = None;
            self.region_rule = RegionRule::default();
        }

        tracing::debug!(region = %region, hard_max_length = hard_max, "phone region set");
        self.config.checks = checks;
        self.config.hard_max_length = hard_max;
        self.config.phone_region = Some(region);
        self.invalidate();
    }

    /// The text as an E.164 number, when the service can render one.
    #[must_use]
    pub fn international_text(&self) -> Option<String> {
        let service = self.phone.as_ref()?;
        let region = self.config.phone_region.as_deref()?;
        self.text.with(|text| service.format_e164(text, region))
    }

    /// Load an international number as national text plus region.
    ///
    /// Returns `false` and leaves the field alone if the service cannot parse it.
    pub fn set_international_text(&mut self, international: &str) -> bool {
        let Some(parsed) = self
            .phone
            .as_ref()
            .and_then(|service| service.parse_international(international))
        else {
            return false;
        };
        self.text.set(parsed.text);
        self.set_phone_region(parsed.region);
        true
    }

    // --- Internals ---

    fn invalidate(&mut self) {
        self.memo = None;
        self.commit(ValidationResult::NotValidated, self.display);
    }

    fn compute(&mut self, force: bool) -> ValidationResult {
        self.reformat_phone_text();

        let key = self.memo_key();
        if !force && !self.result.is_not_validated() && self.memo.as_ref() == Some(&key) {
            tracing::debug!(result = self.result.code(), "evaluation memoized");
            return self.result;
        }

        if self.config.checks.match_targets().any(|target| !target.is_attached()) {
            tracing::warn!("match target dropped; reporting mismatch");
        }

        let region = self.config.phone_region.as_deref().unwrap_or_default();
        let phone = self.phone.as_deref().map(|service| PhoneContext { service, region });
        let input = ValidationInput {
            text: &key.text,
            checks: &self.config.checks,
            phone,
        };
        let result = match &self.validator {
            Some(custom) => custom.validate(&input),
            None => CheckValidator.validate(&input),
        };
        tracing::debug!(result = result.code(), forced = force, "field evaluated");

        self.memo = Some(key);
        result
    }

    fn reformat_phone_text(&mut self) {
        if !self.config.checks.contains(&Check::PhoneNumber) {
            return;
        }
        let (Some(service), Some(region)) = (&self.phone, self.config.phone_region.as_deref())
        else {
            return;
        };
        let formatted = self
            .text
            .with(|text| format_for_display(service.as_ref(), text, region).filter(|f| f.as_str() != text));
        if let Some(formatted) = formatted {
            self.text.set(formatted);
        }
    }

    fn memo_key(&self) -> MemoKey {
        let mut match_texts: Vec<_> = self
            .config
            .checks
            .match_targets()
            .map(MatchTarget::read)
            .collect();
        match_texts.sort();
        MemoKey {
            text: self.text(),
            match_texts,
        }
    }

    fn commit(&mut self, result: ValidationResult, display: DisplayState) {
        let change = FieldChange {
            result,
            display,
            previous_result: self.result,
            previous_display: self.display,
        };
        if !change.result_changed() && !change.display_changed() {
            return;
        }
        self.result = result;
        self.display = display;
        if change.display_changed() {
            tracing::debug!(
                from = ?change.previous_display,
                to = ?change.display,
                result = result.code(),
                "display state changed"
            );
        }
        self.observers.notify(&change);
    }
}

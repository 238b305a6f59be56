#![forbid(unsafe_code)]

//! Field configuration and its validation.

use std::fmt;

use crate::check::{Check, CheckSet};
use crate::display::TriggerOptions;

/// Everything a field is configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfig {
    /// Checks applied on evaluation and gating.
    pub checks: CheckSet,
    /// When automatic validation surfaces visually.
    pub options: TriggerOptions,
    /// Input-rejecting length limit in graphemes. `0` disables it.
    pub hard_max_length: usize,
    /// Region code for phone-number validation.
    pub phone_region: Option<String>,
}

impl FieldConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check (builder).
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.insert(check);
        self
    }

    /// Add several checks (builder).
    #[must_use]
    pub fn with_checks(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Merge trigger options (builder).
    #[must_use]
    pub fn with_options(mut self, options: TriggerOptions) -> Self {
        self.options |= options;
        self
    }

    /// Set the hard length limit (builder).
    #[must_use]
    pub fn with_hard_max_length(mut self, max: usize) -> Self {
        self.hard_max_length = max;
        self
    }

    /// Set the phone region (builder).
    #[must_use]
    pub fn with_phone_region(mut self, region: impl Into<String>) -> Self {
        self.phone_region = Some(region.into());
        self
    }

    /// Validate config constraints and return all violations.
    ///
    /// `phone_service_available` reports whether a phone capability is
    /// attached to the field this config is meant for.
    pub fn validate(&self, phone_service_available: bool) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.checks.contains(&Check::PhoneNumber) {
            if !phone_service_available {
                errors.push(ConfigError::MissingPhoneService);
            } else if self.phone_region.as_deref().is_none_or(str::is_empty) {
                errors.push(ConfigError::MissingPhoneRegion);
            }
        }

        if let (Some(min), Some(max)) = (self.checks.minimum_value(), self.checks.maximum_value())
            && min > max
        {
            errors.push(ConfigError::InvertedValueRange { min, max });
        }

        if self.checks.match_targets().any(|target| !target.is_attached()) {
            errors.push(ConfigError::DetachedMatchTarget);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A configuration that can never validate meaningfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `PhoneNumber` is configured but no phone capability is attached.
    MissingPhoneService,
    /// `PhoneNumber` is configured without a region to validate against.
    MissingPhoneRegion,
    /// `MinimumValue` is above `MaximumValue`.
    InvertedValueRange { min: i64, max: i64 },
    /// `MatchesOther` refers to a field that no longer exists.
    DetachedMatchTarget,
}

impl ConfigError {
    /// The configuration field at fault.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingPhoneService => "checks.phone_number",
            Self::MissingPhoneRegion => "phone_region",
            Self::InvertedValueRange { .. } => "checks.value_range",
            Self::DetachedMatchTarget => "checks.matches_other",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPhoneService => {
                write!(f, "{}: phone number check requires a phone service", self.field())
            }
            Self::MissingPhoneRegion => {
                write!(f, "{}: phone number check requires a region", self.field())
            }
            Self::InvertedValueRange { min, max } => {
                write!(f, "{}: minimum {min} exceeds maximum {max}", self.field())
            }
            Self::DetachedMatchTarget => {
                write!(f, "{}: referenced field no longer exists", self.field())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::SharedText;
    use crate::check::MatchTarget;
    use std::rc::Rc;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FieldConfig::default().validate(false), Ok(()));
    }

    #[test]
    fn builder_accumulates() {
        let config = FieldConfig::new()
            .with_check(Check::NotEmpty)
            .with_checks([Check::Email, Check::MaximumLength(64)])
            .with_options(TriggerOptions::on_editing_changed(false))
            .with_options(TriggerOptions::SUPPRESS_VALID)
            .with_hard_max_length(64);
        assert_eq!(config.checks.len(), 3);
        assert!(config.options.contains(TriggerOptions::EDITING_CHANGED));
        assert!(config.options.contains(TriggerOptions::SUPPRESS_VALID));
        assert_eq!(config.hard_max_length, 64);
    }

    #[test]
    fn phone_requires_service_then_region() {
        let config = FieldConfig::new().with_check(Check::PhoneNumber);
        assert_eq!(config.validate(false), Err(vec![ConfigError::MissingPhoneService]));
        assert_eq!(config.validate(true), Err(vec![ConfigError::MissingPhoneRegion]));
        assert_eq!(config.with_phone_region("za").validate(true), Ok(()));
    }

    #[test]
    fn inverted_value_range() {
        let config = FieldConfig::new().with_checks([Check::MinimumValue(10), Check::MaximumValue(5)]);
        assert_eq!(
            config.validate(false),
            Err(vec![ConfigError::InvertedValueRange { min: 10, max: 5 }])
        );
        let equal = FieldConfig::new().with_checks([Check::MinimumValue(5), Check::MaximumValue(5)]);
        assert_eq!(equal.validate(false), Ok(()));
    }

    #[test]
    fn detached_match_target() {
        let live = Rc::new(SharedText::new(""));
        let ok = FieldConfig::new().with_check(Check::MatchesOther(MatchTarget::new(&live)));
        assert_eq!(ok.validate(false), Ok(()));

        let gone = FieldConfig::new().with_check(Check::MatchesOther(MatchTarget::detached()));
        assert_eq!(gone.validate(false), Err(vec![ConfigError::DetachedMatchTarget]));
    }

    #[test]
    fn reports_every_violation() {
        let config = FieldConfig::new().with_checks([
            Check::PhoneNumber,
            Check::MinimumValue(3),
            Check::MaximumValue(1),
            Check::MatchesOther(MatchTarget::detached()),
        ]);
        let errors = config.validate(false).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors[1].to_string(),
            "checks.value_range: minimum 3 exceeds maximum 1"
        );
    }
}

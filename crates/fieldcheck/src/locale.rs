#![forbid(unsafe_code)]

//! Locale-backed decimal separator.
//!
//! The system separator is detected once per process from the environment
//! and never changes afterwards. Hosts that follow a different locale pass a
//! [`LocaleSeparator`] built from an explicit tag instead.

use std::env;
use std::sync::LazyLock;

use fieldcheck_core::DecimalSeparator;

static SYSTEM_SEPARATOR: LazyLock<LocaleSeparator> = LazyLock::new(|| {
    let lc_all = env::var("LC_ALL").ok();
    let lc_numeric = env::var("LC_NUMERIC").ok();
    let lang = env::var("LANG").ok();
    LocaleSeparator::for_locale(&detect_numeric_locale_from(
        lc_all.as_deref(),
        lc_numeric.as_deref(),
        lang.as_deref(),
    ))
});

/// Languages whose default decimal separator is a comma.
const COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fr", "gl",
    "hr", "hu", "id", "it", "kk", "lt", "lv", "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru",
    "sk", "sl", "sr", "sv", "tr", "uk", "vi",
];

/// Full tags that differ from their language's default.
const REGION_OVERRIDES: &[(&str, &str)] = &[
    ("de-ch", "."),
    ("de-li", "."),
    ("en-za", ","),
    ("es-mx", "."),
    ("es-us", "."),
    ("fr-ch", "."),
    ("it-ch", "."),
];

/// Decimal separator for a locale tag such as `"fr-FR"` or `"en_ZA.UTF-8"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSeparator {
    locale: String,
    separator: &'static str,
}

impl LocaleSeparator {
    /// Resolve the separator for `locale`. Unknown tags use `"."`.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let locale = normalize_locale_raw(locale).unwrap_or_else(|| "en".to_string());
        let separator = separator_for(&locale);
        Self { locale, separator }
    }

    /// The process-wide separator detected from the environment.
    #[must_use]
    pub fn system() -> Self {
        SYSTEM_SEPARATOR.clone()
    }

    /// The normalized locale tag.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl DecimalSeparator for LocaleSeparator {
    fn decimal_separator(&self) -> String {
        self.separator.to_string()
    }
}

fn separator_for(locale: &str) -> &'static str {
    let lower = locale.to_ascii_lowercase();
    if let Some((_, sep)) = REGION_OVERRIDES.iter().find(|(tag, _)| *tag == lower) {
        return *sep;
    }
    let language = lower.split('-').next().unwrap_or(&lower);
    if COMMA_LANGUAGES.contains(&language) {
        ","
    } else {
        "."
    }
}

/// `LC_ALL` wins, then `LC_NUMERIC`, then `LANG`. Falls back to `"en"`.
fn detect_numeric_locale_from(
    lc_all: Option<&str>,
    lc_numeric: Option<&str>,
    lang: Option<&str>,
) -> String {
    lc_all
        .and_then(normalize_locale_raw)
        .or_else(|| lc_numeric.and_then(normalize_locale_raw))
        .or_else(|| lang.and_then(normalize_locale_raw))
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_locale_raw(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    let normalized = raw.replace('_', "-");
    if normalized.eq_ignore_ascii_case("c") || normalized.eq_ignore_ascii_case("posix") {
        return Some("en".to_string());
    }
    Some(normalized)
}

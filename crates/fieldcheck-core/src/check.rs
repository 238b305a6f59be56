#![forbid(unsafe_code)]

//! Validation checks and the set that holds them.
//!
//! A [`Check`] is one rule. Checks compare and hash structurally (variant plus
//! parameters), so a [`CheckSet`] naturally drops exact duplicates while still
//! allowing, say, two different `MinimumLength` bounds.

use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::capability::TextSource;

// ---------------------------------------------------------------------------
// MatchTarget
// ---------------------------------------------------------------------------

/// Non-owning reference to another field's text, for [`Check::MatchesOther`].
///
/// Identity is the referenced allocation: two targets are equal when they
/// point at the same source.
#[derive(Clone)]
pub struct MatchTarget(Weak<dyn TextSource>);

impl MatchTarget {
    /// Reference `source` without keeping it alive.
    #[must_use]
    pub fn new<T: TextSource + 'static>(source: &Rc<T>) -> Self {
        let weak: Weak<T> = Rc::downgrade(source);
        Self(weak)
    }

    /// A target that refers to nothing.
    #[must_use]
    pub fn detached() -> Self {
        let weak: Weak<dyn TextSource> = Weak::<crate::capability::SharedText>::new();
        Self(weak)
    }

    /// Whether the referenced source is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Read the referenced text now. `None` once the source is gone.
    #[must_use]
    pub fn read(&self) -> Option<String> {
        self.0.upgrade().map(|source| source.current_text())
    }

    fn address(&self) -> usize {
        self.0.as_ptr().cast::<()>() as usize
    }
}

impl PartialEq for MatchTarget {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for MatchTarget {}

impl Hash for MatchTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for MatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchTarget")
            .field("address", &format_args!("{:#x}", self.address()))
            .field("attached", &self.is_attached())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// One configured validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Check {
    /// Text must not be empty.
    NotEmpty,
    /// Text must be at least this many characters.
    MinimumLength(usize),
    /// Text must be at most this many characters.
    MaximumLength(usize),
    /// Text must look like an e-mail address.
    Email,
    /// Text must be a valid phone number for the configured region.
    PhoneNumber,
    /// Input is restricted to digits. Gating only.
    Numeric,
    /// Input is restricted to a currency amount. Gating only.
    Currency,
    /// Text must parse to an integer no lower than this.
    MinimumValue(i64),
    /// Text must parse to an integer no higher than this.
    MaximumValue(i64),
    /// Text must pass the Luhn mod-10 checksum.
    LuhnChecksum,
    /// Text must equal another field's current text.
    MatchesOther(MatchTarget),
}

impl Check {
    /// Evaluation rank. Lower ranks are evaluated first.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            Self::NotEmpty => 0,
            Self::MinimumLength(_) => 1,
            Self::MaximumLength(_) => 2,
            Self::Email => 3,
            Self::PhoneNumber => 4,
            Self::LuhnChecksum => 5,
            Self::MinimumValue(_) => 6,
            Self::MaximumValue(_) => 7,
            Self::MatchesOther(_) => 8,
            Self::Numeric | Self::Currency => 9,
        }
    }

    /// Whether this check judges the shape of the text.
    ///
    /// Empty text is reported as `Empty` ahead of any format failure.
    #[must_use]
    pub fn is_format_check(&self) -> bool {
        matches!(self, Self::Email | Self::PhoneNumber | Self::LuhnChecksum)
    }

    /// Whether this check only filters input and never fails evaluation.
    #[must_use]
    pub fn is_input_filter(&self) -> bool {
        matches!(self, Self::Numeric | Self::Currency)
    }

    fn order_key(&self) -> (u8, i128) {
        let param = match self {
            Self::MinimumLength(n) | Self::MaximumLength(n) => *n as i128,
            Self::MinimumValue(v) | Self::MaximumValue(v) => i128::from(*v),
            Self::MatchesOther(target) => target.address() as i128,
            _ => 0,
        };
        (self.precedence(), param)
    }
}

// ---------------------------------------------------------------------------
// CheckSet
// ---------------------------------------------------------------------------

/// An unordered set of checks, evaluated in a fixed precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSet {
    checks: HashSet<Check>,
}

impl CheckSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check. Returns `false` if an identical check was already present.
    pub fn insert(&mut self, check: Check) -> bool {
        self.checks.insert(check)
    }

    /// Remove a check. Returns `true` if it was present.
    pub fn remove(&mut self, check: &Check) -> bool {
        self.checks.remove(check)
    }

    #[must_use]
    pub fn contains(&self, check: &Check) -> bool {
        self.checks.contains(check)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Iterate in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, Check> {
        self.checks.iter()
    }

    /// Checks sorted by evaluation precedence, ties broken by parameter.
    #[must_use]
    pub fn in_precedence_order(&self) -> Vec<&Check> {
        let mut ordered: Vec<&Check> = self.checks.iter().collect();
        ordered.sort_by_key(|check| check.order_key());
        ordered
    }

    /// Whether any check makes the text's shape matter.
    #[must_use]
    pub fn has_format_check(&self) -> bool {
        self.checks.iter().any(Check::is_format_check)
    }

    /// The strictest configured lower value bound.
    #[must_use]
    pub fn minimum_value(&self) -> Option<i64> {
        self.checks
            .iter()
            .filter_map(|check| match check {
                Check::MinimumValue(v) => Some(*v),
                _ => None,
            })
            .max()
    }

    /// The strictest configured upper value bound.
    #[must_use]
    pub fn maximum_value(&self) -> Option<i64> {
        self.checks
            .iter()
            .filter_map(|check| match check {
                Check::MaximumValue(v) => Some(*v),
                _ => None,
            })
            .min()
    }

    /// All `MatchesOther` targets.
    pub fn match_targets(&self) -> impl Iterator<Item = &MatchTarget> {
        self.checks.iter().filter_map(|check| match check {
            Check::MatchesOther(target) => Some(target),
            _ => None,
        })
    }
}

impl FromIterator<Check> for CheckSet {
    fn from_iter<I: IntoIterator<Item = Check>>(iter: I) -> Self {
        Self {
            checks: iter.into_iter().collect(),
        }
    }
}

impl Extend<Check> for CheckSet {
    fn extend<I: IntoIterator<Item = Check>>(&mut self, iter: I) {
        self.checks.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CheckSet {
    type Item = &'a Check;
    type IntoIter = hash_set::Iter<'a, Check>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.iter()
    }
}

#![forbid(unsafe_code)]

//! Ordered change observers.
//!
//! Observers run in subscription order after the engine has finished
//! updating, so every callback sees the same settled state.

use std::fmt;

use fieldcheck_core::{DisplayState, ValidationResult};

/// What changed on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChange {
    pub result: ValidationResult,
    pub display: DisplayState,
    pub previous_result: ValidationResult,
    pub previous_display: DisplayState,
}

impl FieldChange {
    #[must_use]
    pub fn display_changed(&self) -> bool {
        self.display != self.previous_display
    }

    #[must_use]
    pub fn result_changed(&self) -> bool {
        self.result != self.previous_result
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn Fn(&FieldChange)>;

/// Observer list for one field.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`. It runs after every callback registered before it.
    pub fn subscribe(&mut self, callback: impl Fn(&FieldChange) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call every observer in order.
    pub fn notify(&self, change: &FieldChange) {
        for (_, callback) in &self.entries {
            callback(change);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

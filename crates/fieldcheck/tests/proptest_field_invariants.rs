//! Property-based invariant tests for the field engine.
//!
//! 1. A memoized result always equals a fresh evaluation.
//! 2. Memoization follows a referenced field's text.
//! 3. Reset always returns to Default / NotValidated.
//! 4. Edits applied through the gate never exceed the hard limit.
//! 5. Numeric fields only ever hold digits and the separator.
//! 6. Clearing on begin never leaves an Invalid display.

use fieldcheck::core::evaluate;
use fieldcheck::{
    Check, CheckSet, DisplayState, EditRange, FieldConfig, FieldEvent, FixedSeparator,
    MatchTarget, TriggerOptions, ValidatingField, ValidationResult,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn check_strategy() -> impl Strategy<Value = Check> {
    prop_oneof![
        Just(Check::NotEmpty),
        (0usize..10).prop_map(Check::MinimumLength),
        (0usize..10).prop_map(Check::MaximumLength),
        Just(Check::Email),
        Just(Check::Numeric),
        Just(Check::Currency),
        (-20i64..0).prop_map(Check::MinimumValue),
        (0i64..20).prop_map(Check::MaximumValue),
        Just(Check::LuhnChecksum),
    ]
}

fn options_strategy() -> impl Strategy<Value = TriggerOptions> {
    (0u8..64).prop_map(TriggerOptions::from_bits_truncate)
}

fn event_strategy() -> impl Strategy<Value = FieldEvent> {
    prop_oneof![
        Just(FieldEvent::ExplicitRequest),
        Just(FieldEvent::AutomaticNoChange),
        Just(FieldEvent::AutomaticEditingChanged),
        Just(FieldEvent::AutomaticEditingEnded),
    ]
}

/// An edit described relative to the current text length.
#[derive(Debug, Clone)]
struct Edit {
    at: usize,
    remove: usize,
    insert: String,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    (0usize..12, 0usize..3, "[0-9a-z.@ ]{0,3}").prop_map(|(at, remove, insert)| Edit {
        at,
        remove,
        insert,
    })
}

fn apply(field: &mut ValidatingField, edit: &Edit) -> bool {
    let len = field.text().chars().count();
    let at = edit.at.min(len);
    let remove = edit.remove.min(len - at);
    field.apply_edit(EditRange::new(at, remove), &edit.insert)
}

fn configured(checks: Vec<Check>, options: TriggerOptions, hard_max: usize) -> ValidatingField {
    let mut field = ValidatingField::new().with_decimal_separator(FixedSeparator::period());
    field
        .configure(
            FieldConfig::new()
                .with_checks(checks)
                .with_options(options)
                .with_hard_max_length(hard_max),
        )
        .unwrap();
    field
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Memoized result equals a fresh evaluation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn memo_matches_fresh_evaluation(
        checks in proptest::collection::vec(check_strategy(), 0..5),
        edits in proptest::collection::vec(edit_strategy(), 0..12),
        evaluate_after in proptest::collection::vec(any::<bool>(), 12),
    ) {
        let set: CheckSet = checks.iter().cloned().collect();
        let mut field = configured(checks, TriggerOptions::empty(), 0);

        for (edit, eval) in edits.iter().zip(&evaluate_after) {
            apply(&mut field, edit);
            if *eval {
                let memoized = field.evaluate(false);
                prop_assert_eq!(memoized, field.evaluate(false));
                prop_assert_eq!(memoized, evaluate(&field.text(), &set));
            }
        }

        let memoized = field.evaluate(false);
        prop_assert_eq!(memoized, field.evaluate(true));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Memoization follows a referenced field
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn memo_follows_match_target(
        own in "[a-c]{0,3}",
        others in proptest::collection::vec("[a-c]{0,3}", 1..8),
    ) {
        let mut other = ValidatingField::new();
        let mut field = ValidatingField::new().with_text(own.clone());
        field
            .configure(
                FieldConfig::new()
                    .with_check(Check::MatchesOther(MatchTarget::new(&other.text_source()))),
            )
            .unwrap();

        for text in &others {
            other.set_text(text.clone());
            let expected = if *text == own {
                ValidationResult::Valid
            } else {
                ValidationResult::Mismatch
            };
            prop_assert_eq!(field.evaluate(false), expected);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Reset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_always_returns_to_initial(
        checks in proptest::collection::vec(check_strategy(), 0..5),
        options in options_strategy(),
        text in "[0-9a-z@.]{0,8}",
        events in proptest::collection::vec(event_strategy(), 0..6),
    ) {
        let mut field = configured(checks, options, 0);
        field.set_text(text);
        for event in events {
            field.handle_event(event);
        }

        field.reset();
        prop_assert_eq!(field.result(), ValidationResult::NotValidated);
        prop_assert_eq!(field.display_state(), DisplayState::Default);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Gate invariants across edit sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gated_edits_respect_hard_limit(
        max in 1usize..8,
        edits in proptest::collection::vec(edit_strategy(), 0..20),
    ) {
        let mut field = configured(Vec::new(), TriggerOptions::empty(), max);
        for edit in &edits {
            apply(&mut field, edit);
            prop_assert!(field.text().chars().count() <= max);
        }
    }

    #[test]
    fn numeric_field_holds_only_digits(
        edits in proptest::collection::vec(edit_strategy(), 0..20),
    ) {
        let mut field = configured(vec![Check::Numeric], TriggerOptions::empty(), 0);
        for edit in &edits {
            apply(&mut field, edit);
            let text = field.text();
            prop_assert!(
                text.chars().all(|c| c.is_ascii_digit() || c == '.'),
                "unexpected text {:?}",
                text
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Clear on begin
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clear_on_begin_never_leaves_invalid(
        checks in proptest::collection::vec(check_strategy(), 1..5),
        options in options_strategy(),
        text in "[0-9a-z@.]{0,8}",
        event in event_strategy(),
    ) {
        let options = options | TriggerOptions::CLEAR_INVALID_ON_BEGIN;
        let mut field = configured(checks, options, 0);
        field.set_text(text);
        field.handle_event(event);

        prop_assert_ne!(field.editing_began(), DisplayState::Invalid);
    }
}

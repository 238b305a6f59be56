#![forbid(unsafe_code)]

//! End-to-end scenarios: several fields wired together the way a sign-up
//! or checkout form would use them.

use std::cell::RefCell;
use std::rc::Rc;

use fieldcheck::prelude::*;
use fieldcheck::{FieldChange, LocaleSeparator};

struct SignUp {
    email: ValidatingField,
    password: ValidatingField,
    confirm: ValidatingField,
    age: ValidatingField,
}

impl SignUp {
    fn new() -> Self {
        let options =
            TriggerOptions::on_editing_ended(true) | TriggerOptions::CLEAR_INVALID_ON_BEGIN;
        let mut email = ValidatingField::new();
        email
            .configure(
                FieldConfig::new()
                    .with_checks([Check::NotEmpty, Check::Email])
                    .with_options(options),
            )
            .unwrap();

        let mut password = ValidatingField::new();
        password
            .configure(
                FieldConfig::new()
                    .with_checks([Check::MinimumLength(8), Check::MaximumLength(64)])
                    .with_options(options),
            )
            .unwrap();

        let mut confirm = ValidatingField::new();
        confirm
            .configure(
                FieldConfig::new()
                    .with_check(Check::MatchesOther(MatchTarget::new(
                        &password.text_source(),
                    )))
                    .with_options(TriggerOptions::on_editing_changed(true)),
            )
            .unwrap();

        let mut age = ValidatingField::new().with_decimal_separator(FixedSeparator::period());
        age.configure(
            FieldConfig::new()
                .with_checks([
                    Check::NotEmpty,
                    Check::Numeric,
                    Check::MinimumValue(18),
                    Check::MaximumValue(130),
                ])
                .with_hard_max_length(3),
        )
        .unwrap();

        Self {
            email,
            password,
            confirm,
            age,
        }
    }

    fn submit(&mut self) -> Vec<ValidationResult> {
        [
            &mut self.email,
            &mut self.password,
            &mut self.confirm,
            &mut self.age,
        ]
        .into_iter()
        .map(ValidatingField::validate)
        .filter(|r| !r.is_valid())
        .collect()
    }
}

fn type_into(field: &mut ValidatingField, text: &str) -> usize {
    let mut accepted = 0;
    for ch in text.chars() {
        let at = field.text().chars().count();
        let mut buf = [0u8; 4];
        if field.apply_edit(EditRange::insertion(at), ch.encode_utf8(&mut buf)) {
            accepted += 1;
        }
    }
    accepted
}

#[test]
fn blank_form_reports_every_failure() {
    let mut form = SignUp::new();
    let failures = form.submit();
    assert_eq!(
        failures,
        vec![
            ValidationResult::Empty,
            ValidationResult::TooShort {
                length: 0,
                min_length: 8
            },
            ValidationResult::Empty,
        ]
    );
    // Both password fields are blank, so they match.
    assert_eq!(form.confirm.result(), ValidationResult::Valid);
    assert_eq!(form.email.display_state(), DisplayState::Invalid);
    assert_eq!(form.confirm.display_state(), DisplayState::Valid);
}

#[test]
fn completed_form_submits() {
    let mut form = SignUp::new();
    type_into(&mut form.email, "ada@example.org");
    type_into(&mut form.password, "correct horse");
    type_into(&mut form.confirm, "correct horse");
    assert_eq!(type_into(&mut form.age, "36"), 2);

    assert!(form.submit().is_empty());
    assert_eq!(form.age.display_state(), DisplayState::Valid);
}

#[test]
fn confirm_tracks_password_edits() {
    let mut form = SignUp::new();
    type_into(&mut form.password, "secret-one");
    type_into(&mut form.confirm, "secret-one");
    assert_eq!(
        form.confirm.handle_event(FieldEvent::AutomaticEditingChanged),
        DisplayState::Valid
    );

    form.password.set_text("secret-two");
    assert_eq!(
        form.confirm.handle_event(FieldEvent::AutomaticEditingChanged),
        DisplayState::Invalid
    );
    assert_eq!(form.confirm.result(), ValidationResult::Mismatch);
}

#[test]
fn age_field_filters_and_bounds() {
    let mut form = SignUp::new();
    assert_eq!(type_into(&mut form.age, "1a7"), 2);
    assert_eq!(form.age.text(), "17");
    assert_eq!(
        form.age.validate(),
        ValidationResult::TooLow {
            value: 17,
            min_value: 18
        }
    );

    form.age.set_text("");
    assert_eq!(type_into(&mut form.age, "1400"), 3);
    assert_eq!(
        form.age.validate(),
        ValidationResult::TooHigh {
            value: 140,
            max_value: 130
        }
    );
}

#[test]
fn invalid_display_clears_when_editing_resumes() {
    let mut form = SignUp::new();
    type_into(&mut form.email, "ada@");
    assert_eq!(
        form.email.handle_event(FieldEvent::AutomaticEditingEnded),
        DisplayState::Invalid
    );
    assert_eq!(form.email.editing_began(), DisplayState::Default);

    type_into(&mut form.email, "example.org");
    assert_eq!(
        form.email.handle_event(FieldEvent::AutomaticEditingEnded),
        DisplayState::Valid
    );
}

#[test]
fn card_number_with_observer() {
    let mut card = ValidatingField::new().with_decimal_separator(FixedSeparator::period());
    card.configure(
        FieldConfig::new()
            .with_checks([Check::NotEmpty, Check::Numeric, Check::LuhnChecksum])
            .with_hard_max_length(16)
            .with_options(TriggerOptions::on_editing_changed(false)),
    )
    .unwrap();

    let log: Rc<RefCell<Vec<FieldChange>>> = Rc::default();
    let sink = Rc::clone(&log);
    card.subscribe(move |change| {
        if change.display_changed() {
            sink.borrow_mut().push(*change);
        }
    });

    assert_eq!(type_into(&mut card, "4539 1488 0343 6467"), 16);
    card.handle_event(FieldEvent::AutomaticEditingChanged);
    assert_eq!(card.result(), ValidationResult::Valid);

    card.set_text("4539148803436468");
    card.handle_event(FieldEvent::AutomaticEditingChanged);
    assert_eq!(card.result(), ValidationResult::Malformed);

    let log = log.borrow();
    let states: Vec<_> = log.iter().map(|c| c.display).collect();
    assert_eq!(states, vec![DisplayState::Valid, DisplayState::Default]);
}

#[test]
fn locale_separator_drives_currency_input() {
    let mut price =
        ValidatingField::new().with_decimal_separator(LocaleSeparator::for_locale("de_DE"));
    price
        .configure(FieldConfig::new().with_check(Check::Currency))
        .unwrap();

    assert_eq!(type_into(&mut price, "12,345"), 5);
    assert_eq!(price.text(), "12,34");
    assert!(!price.input_gate(EditRange::insertion(0), ","));
    assert!(price.validate().is_valid());
}

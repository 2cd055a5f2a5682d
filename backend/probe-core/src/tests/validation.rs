// Unit tests for key format validation (the structural pre-checks).

use crate::error::KeyValidationFailure;
use crate::validation::{KeyValidator, MIN_KEY_LENGTH, ValidationResult};

/// **VALUE**: Verifies empty and whitespace-only keys are rejected.
///
/// **WHY THIS MATTERS**: The pre-checks exist so a missing key never
/// costs a network round-trip. Whitespace from a sloppy paste must
/// count as empty.
///
/// **BUG THIS CATCHES**: Would catch trimming being dropped from the
/// validator, letting "   " through to the prober.
#[test]
fn given_empty_or_whitespace_key_when_validated_then_empty_failure() {
    let validator = KeyValidator::new();

    for key in ["", "   ", "\t\n"] {
        match validator.validate(key) {
            ValidationResult::Invalid(KeyValidationFailure::Empty) => {}
            other => panic!("expected Empty failure for {key:?}, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies every key shorter than 30 characters is rejected
/// with the actual length reported.
///
/// **WHY THIS MATTERS**: Short keys are structurally impossible Gemini
/// keys; probing them wastes a request and produces a confusing
/// provider-side error instead of a crisp local one.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one at the 30-character
/// boundary.
#[test]
fn given_key_shorter_than_minimum_when_validated_then_too_short_failure() {
    let validator = KeyValidator::new();

    for len in [1usize, 12, 29] {
        match validator.validate(&"a".repeat(len)) {
            ValidationResult::Invalid(KeyValidationFailure::TooShort { min, actual }) => {
                assert_eq!(min, MIN_KEY_LENGTH);
                assert_eq!(actual, len);
            }
            other => panic!("expected TooShort for length {len}, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies a 30-character key passes (boundary inclusive).
#[test]
fn given_key_of_exactly_minimum_length_when_validated_then_valid() {
    let validator = KeyValidator::new();

    assert!(matches!(
        validator.validate(&"a".repeat(MIN_KEY_LENGTH)),
        ValidationResult::Valid
    ));
}

/// **VALUE**: Verifies validate_and_wrap trims before wrapping so the
/// transmitted key has no paste artifacts.
///
/// **BUG THIS CATCHES**: Would catch the wrapped key keeping leading or
/// trailing whitespace that the provider would then reject.
#[test]
fn given_padded_valid_key_when_wrapped_then_key_is_trimmed() {
    let validator = KeyValidator::new();
    let raw = format!("  {}\n", "b".repeat(36));

    let wrapped = validator.validate_and_wrap(raw).expect("must validate");

    assert_eq!(wrapped.len(), 36);
    assert_eq!(wrapped.as_str(), "b".repeat(36));
}

/// **VALUE**: Verifies the invalid path of validate_and_wrap surfaces
/// the failure reason.
#[test]
fn given_short_key_when_wrapped_then_error_carries_reason() {
    let validator = KeyValidator::new();

    let err = validator
        .validate_and_wrap(String::from("too-short"))
        .expect_err("must fail");

    assert!(matches!(
        err.reason(),
        KeyValidationFailure::TooShort { min: 30, actual: 9 }
    ));
}

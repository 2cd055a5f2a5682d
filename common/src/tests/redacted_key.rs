// Unit tests for RedactedApiKey masking and redaction guarantees.

use crate::RedactedApiKey;

/// **VALUE**: Verifies the masking rule for short keys (full redaction).
///
/// **WHY THIS MATTERS**: Keys of 12 characters or fewer carry too little
/// entropy to show any part of them. The mask must leak nothing while
/// still reflecting the key's length.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one at the 12-character
/// boundary that starts leaking prefix/suffix characters of short keys.
#[test]
fn given_key_of_twelve_chars_or_fewer_when_masked_then_fully_redacted() {
    for len in [0usize, 1, 5, 12] {
        let key = RedactedApiKey::new("k".repeat(len));
        let masked = key.masked();

        assert_eq!(masked.chars().count(), len, "mask must match key length");
        assert!(
            masked.chars().all(|c| c == '*'),
            "short key mask must be all redaction characters, got {masked:?}"
        );
    }
}

/// **VALUE**: Verifies the masking rule for normal-length keys.
///
/// **WHY THIS MATTERS**: The masked form is the ONLY representation of
/// the key that ever reaches the user. First 8 + redaction run + last 4
/// is enough for the user to recognize which key was tested without
/// exposing it.
///
/// **BUG THIS CATCHES**: Would catch wrong prefix/suffix widths or a
/// redaction run of the wrong length.
#[test]
fn given_long_key_when_masked_then_first_eight_and_last_four_visible() {
    let key = RedactedApiKey::new(String::from("AIzaSyDemoKey1234567890abcdefghijklm"));
    let masked = key.masked();

    assert!(masked.starts_with("AIzaSyDe"));
    assert!(masked.ends_with("jklm"));
    assert_eq!(masked.len(), key.len());
    assert_eq!(
        masked[8..masked.len() - 4],
        "*".repeat(key.len() - 12),
        "middle must be one redaction char per hidden character"
    );
}

/// **VALUE**: Verifies the exact mask from the end-to-end scenario:
/// forty 'x' characters mask to 8 visible + 24 stars + 4 visible.
///
/// **BUG THIS CATCHES**: Would catch any drift in the deterministic
/// masking rule that downstream snapshots depend on.
#[test]
fn given_forty_char_key_when_masked_then_twenty_four_char_redaction_run() {
    let key = RedactedApiKey::new("x".repeat(40));

    assert_eq!(
        key.masked(),
        format!("xxxxxxxx{}xxxx", "*".repeat(24))
    );
}

/// **VALUE**: Verifies Debug and Display never expose the key value.
///
/// **WHY THIS MATTERS**: Keys routinely end up in log lines via `{:?}`.
/// The whole point of the wrapper is that this is safe.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug impl replacing the
/// hand-written redacting one.
#[test]
fn given_key_when_formatted_then_value_never_appears() {
    let key = RedactedApiKey::new(String::from("AIzaSySuperSecretValue0123456789"));

    let debug = format!("{key:?}");
    let display = format!("{key}");

    assert!(!debug.contains("SuperSecret"));
    assert!(!display.contains("SuperSecret"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies serialization is refused.
///
/// **WHY THIS MATTERS**: A report that accidentally embeds the raw key
/// instead of the masked string must fail loudly at serialization time,
/// not silently ship the secret.
#[test]
fn given_key_when_serialized_then_errors() {
    let key = RedactedApiKey::new(String::from("AIzaSyDemoKey1234567890abcdef"));

    let result = serde_json::to_string(&key);

    assert!(result.is_err(), "RedactedApiKey must refuse serialization");
}

/// **VALUE**: Verifies multibyte keys cannot panic the masker.
///
/// **BUG THIS CATCHES**: Would catch byte-indexed slicing that splits a
/// UTF-8 codepoint when a pasted key contains stray non-ASCII input.
#[test]
fn given_multibyte_key_when_masked_then_no_panic_and_char_counts_hold() {
    let key = RedactedApiKey::new("é".repeat(20));
    let masked = key.masked();

    assert_eq!(masked.chars().count(), 20);
    assert_eq!(masked.chars().filter(|c| *c == '*').count(), 8);
}

// Unit tests for argument parsing and key resolution.

use crate::cli::{API_KEY_ENV, CliArgs, parse_args, resolve_key};
use crate::error::KeyprobeError;

use serial_test::serial;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// **VALUE**: Verifies the supported flag and positional combinations
/// parse as expected.
#[test]
fn given_flag_and_key_when_parsed_then_both_captured() {
    let parsed = parse_args(args(&["--json", "AIzaSyExample"])).expect("must parse");

    assert!(parsed.json);
    assert_eq!(parsed.key.as_deref(), Some("AIzaSyExample"));
    assert!(!parsed.help);
}

/// **VALUE**: Verifies unknown options and duplicate keys are usage
/// errors rather than being silently ignored.
///
/// **BUG THIS CATCHES**: Would catch a typoed flag (e.g. `--jsn`) being
/// treated as the API key and sent to the provider.
#[test]
fn given_bad_invocations_when_parsed_then_usage_errors() {
    assert!(matches!(
        parse_args(args(&["--jsn"])),
        Err(KeyprobeError::Usage { .. })
    ));
    assert!(matches!(
        parse_args(args(&["key-one", "key-two"])),
        Err(KeyprobeError::Usage { .. })
    ));
}

/// **VALUE**: Verifies the positional key wins over the environment.
///
/// **WHY THIS MATTERS**: A user explicitly passing a key to test must
/// not have it silently overridden by a stale exported variable.
#[test]
#[serial]
fn given_arg_and_env_key_when_resolved_then_arg_wins() {
    // SAFETY: guarded by #[serial]; no other thread touches this var.
    unsafe { std::env::set_var(API_KEY_ENV, "env-key") };

    let parsed = CliArgs {
        json: false,
        key: Some(String::from("arg-key")),
        help: false,
    };
    let resolved = resolve_key(&parsed);

    unsafe { std::env::remove_var(API_KEY_ENV) };
    assert_eq!(resolved.as_deref(), Some("arg-key"));
}

/// **VALUE**: Verifies the environment variable is the fallback source,
/// and that resolution yields nothing when neither source is set.
#[test]
#[serial]
fn given_env_key_only_when_resolved_then_env_used() {
    unsafe { std::env::set_var(API_KEY_ENV, "env-key") };
    let resolved = resolve_key(&CliArgs::default());
    unsafe { std::env::remove_var(API_KEY_ENV) };

    assert_eq!(resolved.as_deref(), Some("env-key"));
    assert_eq!(resolve_key(&CliArgs::default()), None);
}

// Unit tests for logger initialization.

use crate::logger::initialize;

use tempfile::tempdir;

/// **VALUE**: Verifies the logger initializes once and tolerates
/// repeated initialization.
///
/// **WHY THIS MATTERS**: The global logger can only be installed once
/// per process. A second call must be a harmless no-op, not a panic or
/// an error, or library consumers embedding the CLI crate would crash.
///
/// **BUG THIS CATCHES**: Would catch the double-init guard being
/// removed, which turns a second `initialize` into a fern apply error.
#[test]
fn given_logger_when_initialized_twice_then_both_calls_succeed() {
    let dir = tempdir().expect("tempdir");

    let first = initialize(dir.path());
    let second = initialize(dir.path());

    assert!(first.is_ok(), "first init must succeed: {first:?}");
    assert!(second.is_ok(), "repeat init must be a no-op: {second:?}");
}

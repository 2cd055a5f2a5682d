//! Argument and environment handling for the keyprobe binary.

use crate::error::KeyprobeError;

use std::env;

use log::debug;

/// Environment variable consulted when no key argument is given.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const USAGE: &str = "usage: keyprobe [--json] [API_KEY]\n\
    \n\
    Validates a Gemini API key against the live API.\n\
    The key is read from the first positional argument, or from the\n\
    GEMINI_API_KEY environment variable (a .env file in the working\n\
    directory is honored).";

/// Parsed invocation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Emit the report as JSON instead of human-readable text.
    pub json: bool,
    /// Key given on the command line, if any.
    pub key: Option<String>,
    pub help: bool,
}

/// Parse command-line arguments (excluding argv[0]).
pub fn parse_args<I>(args: I) -> Result<CliArgs, KeyprobeError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();

    for arg in args {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--help" | "-h" => parsed.help = true,
            _ if arg.starts_with('-') => {
                return Err(KeyprobeError::usage(format!("unknown option '{arg}'")));
            }
            _ => {
                if parsed.key.is_some() {
                    return Err(KeyprobeError::usage("more than one key argument given"));
                }
                parsed.key = Some(arg);
            }
        }
    }

    Ok(parsed)
}

/// Resolve the key to test: positional argument first, environment
/// second.
///
/// Returns the raw, unvalidated string; structural validation is the
/// caller's next step.
pub fn resolve_key(args: &CliArgs) -> Option<String> {
    if let Some(key) = &args.key {
        return Some(key.clone());
    }

    match env::var(API_KEY_ENV) {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("No {API_KEY_ENV} env var found");
            None
        }
    }
}

/// Load a .env file if one exists (non-fatal if missing).
pub fn try_load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env from: {path:?}"),
        Err(_) => debug!("No .env file found - will check existing environment variables"),
    }
}

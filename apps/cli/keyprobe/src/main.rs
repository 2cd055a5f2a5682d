use keyprobe::cli;
use keyprobe::error::KeyprobeError;
use keyprobe::logger::initialize as logger_initialize;
use keyprobe::render;

use probe_core::Prober;
use probe_core::policy::SelectionPolicy;
use probe_core::validation::KeyValidator;

use std::fs::create_dir_all;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{info, warn};

/// Probe failed (invalid key or fatal provider error).
const EXIT_PROBE_FAILED: u8 = 1;

/// Invocation problem: bad arguments or a key that failed the
/// structural pre-checks.
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            if matches!(e, KeyprobeError::Usage { .. }) {
                eprintln!("\n{}", cli::USAGE);
            }
            ExitCode::from(EXIT_USAGE)
        }
    }
}

async fn run() -> Result<ExitCode, KeyprobeError> {
    let args = cli::parse_args(std::env::args().skip(1))?;

    if args.help {
        println!("{}", cli::USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let log_dir = log_directory();
    create_dir_all(&log_dir)
        .map_err(|e| KeyprobeError::app(format!("Failed to create log directory: {e}")))?;
    logger_initialize(&log_dir)?;

    info!("Keyprobe starting");
    info!("Log directory: {}", log_dir.display());

    cli::try_load_dotenv();

    let raw_key = cli::resolve_key(&args).ok_or_else(|| {
        KeyprobeError::usage(format!(
            "no API key given (argument or {} environment variable)",
            cli::API_KEY_ENV
        ))
    })?;

    // Structural pre-checks: failures here never reach the prober.
    let validator = KeyValidator::new();
    let api_key = match validator.validate_and_wrap(raw_key) {
        Ok(key) => key,
        Err(e) => {
            warn!("Key failed structural validation: {e}");
            eprintln!("{}", render::validation_message(e.reason()));
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    let policy = load_policy();
    let report = Prober::new(policy).probe(&api_key).await;

    let rendered = if args.json {
        render::render_json(&report)?
    } else {
        render::render_text(&report)
    };
    println!("{rendered}");

    if report.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_PROBE_FAILED))
    }
}

/// Per-user log directory, falling back to the working directory.
fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("keyprobe"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Selection policy from the user's config directory, or defaults.
fn load_policy() -> SelectionPolicy {
    let config_dir = dirs::config_dir()
        .map(|dir| dir.join("keyprobe"))
        .unwrap_or_else(|| PathBuf::from("."));

    match SelectionPolicy::load(&config_dir) {
        Ok(policy) => policy,
        Err(e) => {
            warn!("Falling back to default selection policy: {e}");
            SelectionPolicy::default()
        }
    }
}

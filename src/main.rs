//! Prints the credentials document named by the configured environment
//! variable. Logs go to stderr so stdout carries only the document.

use std::process::ExitCode;

use credentials_loader::config::{load_dotenv, LoaderSettings};
use credentials_loader::redact::redacted;
use credentials_loader::{load_from_env, LoadError};
use serde_json::Value;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(settings: &LoaderSettings) -> Result<(), LoadError> {
    let loaded = load_from_env(&settings.path_var)?;
    info!(
        path = %loaded.path.display(),
        fingerprint = %loaded.fingerprint,
        kind = loaded.document.kind().unwrap_or("unknown"),
        keys = loaded.document.len(),
        "credentials loaded"
    );

    let printable = if settings.reveal_secrets {
        warn!("printing credentials with secrets revealed");
        Value::Object(loaded.document.into_inner())
    } else {
        redacted(&loaded.document)
    };

    println!("{printable:#}");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let mut settings = LoaderSettings::from_env();
    if load_dotenv(&settings) {
        // .env may have set the loader's own variables too.
        settings = LoaderSettings::from_env();
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = err.kind(), "{err}");
            eprintln!("credentials load failed: {err}");
            ExitCode::FAILURE
        }
    }
}

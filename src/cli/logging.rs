//! Log subscriber setup
//!
//! Engine events go to stderr so stdout stays clean for piped output.
//! `RUST_LOG` takes precedence over `-v` / `-q`. A `--log-file` is appended
//! to, so one file can collect every run for a piano.

use miette::{IntoDiagnostic, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::GlobalOpts;

/// Default filter directive for the verbosity flags
pub fn level_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
pub fn init(global: &GlobalOpts) -> Result<()> {
    let filter = level_filter(global.verbose, global.quiet);

    let file_layer = match &global.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .into_diagnostic()?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .into_diagnostic()?;

    Ok(())
}

//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::{FitConfig, ProbeTable};

/// Decimal places shown for lengths and angles
pub const DISPLAY_PRECISION: usize = 4;

/// Format a length (in) for aligned display
pub fn format_length(value: f64) -> String {
    format!("{:.*}", DISPLAY_PRECISION, value)
}

/// Format an angle (deg) for aligned display
pub fn format_angle(value: f64) -> String {
    format!("{:+.*}", DISPLAY_PRECISION - 2, value)
}

/// Load the fit configuration for this invocation
///
/// An explicit `--config` must exist; otherwise `keyfit.yaml` in the working
/// directory is used when present.
pub fn load_config(global: &GlobalOpts) -> Result<FitConfig> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(FitConfig::load(global.config.as_deref(), &cwd)?)
}

/// Parse a probe CSV, naming the file in any error
pub fn load_probe_table(path: &Path) -> Result<ProbeTable> {
    ProbeTable::from_path(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read probe file {}", path.display()))
}

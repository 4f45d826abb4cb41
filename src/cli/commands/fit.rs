//! `keyfit fit` command - Fit a whole keyboard section
//!
//! Reads one probe CSV, fits every white key and prints the per-key
//! parameters with the section summary. Keys that could not be fitted are
//! listed but do not make the command fail.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::helpers::{format_angle, format_length, load_config, load_probe_table};
use crate::cli::output::{effective_format, print_json, print_yaml};
use crate::cli::table::{render_table, KeyParamsRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{compute_section, find_latest_probe_csv, key_shoulders, RunContext, SectionResult};
use crate::model::{write_parameters_csv, write_parameters_file};

#[derive(clap::Args, Debug)]
pub struct FitArgs {
    /// Probe CSV file for one keyboard section
    #[arg(required_unless_present = "latest", conflicts_with = "latest")]
    pub csv: Option<PathBuf>,

    /// Use the newest *_Upper.csv / *_Lower.csv found under this directory
    #[arg(long, value_name = "DIR")]
    pub latest: Option<PathBuf>,

    /// Piano identifier, e.g. Steinway_123456_Upper (defaults to the file stem)
    #[arg(long)]
    pub piano_id: Option<String>,

    /// Write the key parameter report to this file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the key parameter report into this directory under its default name
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    pub export_dir: Option<PathBuf>,
}

impl FitArgs {
    /// Probe file this run reads
    fn probe_path(&self) -> Result<PathBuf> {
        match (&self.csv, &self.latest) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(dir)) => Ok(find_latest_probe_csv(dir).into_diagnostic()?),
            (None, None) => Err(miette::miette!("No probe file given")),
        }
    }
}

/// Run the fit command
pub fn run(args: FitArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let path = args.probe_path()?;
    let table = load_probe_table(&path)?;
    let context = RunContext::from_probe_path(&path, args.piano_id.as_deref());

    let result = compute_section(&table, &context, &config);

    if let Some(output) = &args.output {
        let file = File::create(output).into_diagnostic()?;
        let mut file = write_parameters_csv(file, &result).into_diagnostic()?;
        file.flush().into_diagnostic()?;
        report_written(output);
    }
    if let Some(dir) = &args.export_dir {
        let written = write_parameters_file(dir, &result).into_diagnostic()?;
        report_written(&written);
    }

    match effective_format(global.format, true) {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Yaml => print_yaml(&result)?,
        OutputFormat::Csv => {
            write_parameters_csv(io::stdout().lock(), &result).into_diagnostic()?;
        }
        OutputFormat::Table => {
            print_header(&result);
            println!("{}", render_table(result.keys.values().map(KeyParamsRow::from)));
            print_summary(&result);
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            print_header(&result);
            print_columns(&result);
            print_summary(&result);
        }
    }

    Ok(())
}

fn report_written(path: &Path) {
    eprintln!(
        "{} Wrote key parameters to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
}

fn print_header(result: &SectionResult) {
    println!(
        "{} {} section",
        style(&result.context.piano_id).cyan().bold(),
        result.context.section
    );
    println!();
}

fn print_columns(result: &SectionResult) {
    println!(
        "{:<5} {:<6} {:>9} {:>7} {:>7} {:>7} {:>7}",
        style("KEY").bold(),
        style("SHLDR").bold(),
        style("CENTERX").bold(),
        style("ANGLE").bold(),
        style("WIDTH").bold(),
        style("LSTEP").bold(),
        style("RSTEP").bold()
    );
    println!("{}", "-".repeat(54));

    for params in result.keys.values() {
        println!(
            "{:<5} {:<6} {:>9} {:>7} {:>7} {:>7} {:>7}",
            style(params.key_number).cyan(),
            key_shoulders(params.key_number),
            format_length(params.center_x),
            format_angle(params.angle_deg),
            format_length(params.width),
            format_length(params.left_step),
            format_length(params.right_step)
        );
    }
}

fn print_summary(result: &SectionResult) {
    println!();
    println!(
        "Shoulder length: {} in   Key height: {} in",
        style(format_length(result.global.shoulder_length)).yellow(),
        style(format_length(result.global.key_height)).yellow()
    );

    let report = &result.report;
    let count = format!("{}/{}", report.processed_count, report.total_white_keys);
    let count = if report.is_complete() {
        style(count).green()
    } else {
        style(count).yellow()
    };
    println!("Processed {} white keys", count);

    for skipped in &report.skipped {
        println!(
            "  {} key {}: {}",
            style("!").yellow(),
            skipped.key,
            style(&skipped.reason).dim()
        );
    }
}

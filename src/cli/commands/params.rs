//! `keyfit params` command - Model parameter expressions for a section
//!
//! Prints one `Name = expression` line per parameter, ready to paste into
//! the parametric keytop model.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, load_probe_table};
use crate::cli::output::{effective_format, print_json, print_yaml};
use crate::cli::table::{render_table, ParameterRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{compute_section, RunContext};
use crate::model::model_parameters;

#[derive(clap::Args, Debug)]
pub struct ParamsArgs {
    /// Probe CSV file for one keyboard section
    pub csv: PathBuf,

    /// Piano identifier (defaults to the file stem)
    #[arg(long)]
    pub piano_id: Option<String>,
}

/// Run the params command
pub fn run(args: ParamsArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let table = load_probe_table(&args.csv)?;
    let context = RunContext::from_probe_path(&args.csv, args.piano_id.as_deref());

    let result = compute_section(&table, &context, &config);
    let parameters = model_parameters(&result.global, result.keys.values());

    match effective_format(global.format, true) {
        OutputFormat::Json => print_json(&parameters)?,
        OutputFormat::Yaml => print_yaml(&parameters)?,
        OutputFormat::Csv => {
            println!("name,value,unit");
            for param in &parameters {
                println!("{},{},{}", param.name, param.value, param.unit);
            }
        }
        OutputFormat::Table => {
            println!("{}", render_table(parameters.iter().map(ParameterRow::from)));
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            for param in &parameters {
                println!("{} = {}", style(&param.name).cyan(), param.expression());
            }
        }
    }

    Ok(())
}

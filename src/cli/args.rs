//! Command line arguments

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, fit::FitArgs, key::KeyArgs, keys::KeysArgs, params::ParamsArgs,
};

/// Fit piano keytop outline parameters from CMM probe data
#[derive(Parser, Debug)]
#[command(name = "keyfit", author, version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Fit configuration file (defaults to ./keyfit.yaml when present)
    #[arg(long, global = true, env = "KEYFIT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write log output to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// TSV for lists, YAML for single items
    #[default]
    Auto,
    /// Boxed table
    Table,
    /// Aligned columns
    Tsv,
    Csv,
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit every white key in a section probe file
    Fit(FitArgs),

    /// Show the fit of a single key in detail
    Key(KeyArgs),

    /// List keys 1-88 with note names and shoulder types
    Keys(KeysArgs),

    /// Print model parameter expressions for a section
    Params(ParamsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

//! `keyfit keys` command - List the keyboard layout

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::output::{effective_format, print_json, print_yaml};
use crate::cli::table::{render_table, KeyClassRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{is_white_key, key_shoulders, note_name, ShoulderType, FIRST_KEY, LAST_KEY};

#[derive(clap::Args, Debug)]
pub struct KeysArgs {
    /// Only list white keys
    #[arg(long)]
    pub white_only: bool,
}

#[derive(Debug, Serialize)]
struct KeyInfo {
    key: u32,
    note: &'static str,
    white: bool,
    shoulders: ShoulderType,
}

/// Run the keys command
pub fn run(args: KeysArgs, global: &GlobalOpts) -> Result<()> {
    let keys: Vec<KeyInfo> = (FIRST_KEY..=LAST_KEY)
        .filter(|key| !args.white_only || is_white_key(*key))
        .map(|key| KeyInfo {
            key,
            note: note_name(key),
            white: is_white_key(key),
            shoulders: key_shoulders(key),
        })
        .collect();

    match effective_format(global.format, true) {
        OutputFormat::Json => print_json(&keys)?,
        OutputFormat::Yaml => print_yaml(&keys)?,
        OutputFormat::Csv => {
            println!("key,note,white,shoulders");
            for info in &keys {
                println!("{},{},{},{}", info.key, info.note, info.white, info.shoulders);
            }
        }
        OutputFormat::Table => {
            println!("{}", render_table(keys.iter().map(|info| KeyClassRow::new(info.key))));
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<5} {:<5} {:<6} {:<9}",
                style("KEY").bold(),
                style("NOTE").bold(),
                style("COLOR").bold(),
                style("SHOULDERS").bold()
            );
            println!("{}", "-".repeat(28));
            for info in &keys {
                let color = if info.white {
                    style("white").white()
                } else {
                    style("black").dim()
                };
                println!(
                    "{:<5} {:<5} {:<6} {:<9}",
                    style(info.key).cyan(),
                    info.note,
                    color,
                    info.shoulders
                );
            }
        }
    }

    Ok(())
}

//! `keyfit key` command - Show the fit of a single key

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{format_angle, format_length, load_config, load_probe_table};
use crate::cli::output::{effective_format, print_json, print_yaml};
use crate::cli::table::{render_table, KeyParamsRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{
    compute_key_in_table, key_shoulders, note_name, Direction, EdgeBands, KeyFit, KeyProbes,
    PivotRotation, PlanePoint, ProbePoint, ShoulderType,
};

#[derive(clap::Args, Debug)]
pub struct KeyArgs {
    /// Probe CSV file for one keyboard section
    pub csv: PathBuf,

    /// Key number (1-88)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=88))]
    pub key: u32,
}

/// Probe counts per edge band, split on the y of the aligned key as the
/// outline walls are
#[derive(Debug, PartialEq, Serialize)]
struct BandCounts {
    left_front: usize,
    left_tail: usize,
    right_front: usize,
    right_tail: usize,
    front: usize,
}

impl BandCounts {
    fn aligned(probes: &KeyProbes, rotation: &PivotRotation, band_split_y: f64) -> Self {
        let band = |direction| {
            EdgeBands::split(&rotation.apply_all(&plan(probes.points(direction))), band_split_y)
        };
        let left = band(Direction::Left);
        let right = band(Direction::Right);

        Self {
            left_front: left.front.len(),
            left_tail: left.tail.len(),
            right_front: right.front.len(),
            right_tail: right.tail.len(),
            front: probes.front.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct KeyDetail {
    key: u32,
    note: &'static str,
    shoulders: ShoulderType,
    probes: BandCounts,
    #[serde(flatten)]
    fit: KeyFit,
}

fn plan(points: &[ProbePoint]) -> Vec<PlanePoint> {
    points.iter().map(ProbePoint::plan).collect()
}

/// Run the key command
pub fn run(args: KeyArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let table = load_probe_table(&args.csv)?;

    let fit = compute_key_in_table(&table, args.key, &config).map_err(|e| miette::miette!("{}", e))?;

    let probes = table
        .get(args.key)
        .ok_or_else(|| miette::miette!("Key {} was not probed", args.key))?;
    let rotation = PivotRotation::new(
        fit.angle.angle_deg,
        PlanePoint::new(fit.center[0], fit.center[1]),
    );
    let counts = BandCounts::aligned(probes, &rotation, config.band_split_y);

    let detail = KeyDetail {
        key: args.key,
        note: note_name(args.key),
        shoulders: key_shoulders(args.key),
        probes: counts,
        fit,
    };

    match effective_format(global.format, false) {
        OutputFormat::Json => print_json(&detail)?,
        OutputFormat::Yaml | OutputFormat::Auto => print_yaml(&detail)?,
        OutputFormat::Csv => {
            let params = &detail.fit.outline.params;
            println!("Key,ShoulderType,CenterX,Angle,Width,LeftStep,RightStep");
            println!(
                "{},{},{},{},{},{},{}",
                params.key_number,
                detail.shoulders,
                params.center_x,
                params.angle_deg,
                params.width,
                params.left_step,
                params.right_step
            );
        }
        OutputFormat::Table => {
            print_detail(&detail);
            println!();
            println!(
                "{}",
                render_table(std::iter::once(KeyParamsRow::from(&detail.fit.outline.params)))
            );
        }
        OutputFormat::Tsv => print_detail(&detail),
    }

    Ok(())
}

fn print_detail(detail: &KeyDetail) {
    let fit = &detail.fit;
    let params = &fit.outline.params;

    println!(
        "{} {} ({} shoulders)",
        style(format!("Key {}", detail.key)).cyan().bold(),
        detail.note,
        detail.shoulders
    );
    println!(
        "  Probes:      left {}+{}  right {}+{} (front+tail, aligned)  front {}{}",
        detail.probes.left_front,
        detail.probes.left_tail,
        detail.probes.right_front,
        detail.probes.right_tail,
        detail.probes.front,
        if fit.synthesized_front {
            style(" (synthesized)").yellow().to_string()
        } else {
            String::new()
        }
    );
    println!(
        "  Pivot:       ({}, {})",
        format_length(fit.center[0]),
        format_length(fit.center[1])
    );
    println!(
        "  Search:      {} deg, slack {:.6} over {} angles",
        format_angle(fit.angle.angle_deg),
        fit.angle.metric,
        fit.angle.candidates
    );
    println!();
    println!("  CenterX:     {} in", style(format_length(params.center_x)).yellow());
    println!("  Angle:       {} deg", style(format_angle(params.angle_deg)).yellow());
    println!("  Width:       {} in", style(format_length(params.width)).yellow());
    println!("  Left step:   {} in", format_length(params.left_step));
    println!("  Right step:  {} in", format_length(params.right_step));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_counts_follow_alignment() {
        let mut probes = KeyProbes::default();
        probes.left.push(ProbePoint::new(-0.45, 0.25, 0.0));
        probes.left.push(ProbePoint::new(-0.45, 2.0, 0.0));
        probes.right.push(ProbePoint::new(0.45, 0.25, 0.0));
        // Measured below the split, above it once rotated by 2 degrees
        probes.right.push(ProbePoint::new(0.5, 0.742, 0.0));
        probes.front.push(ProbePoint::new(0.0, -1.2, 0.0));

        let unrotated = PivotRotation::new(0.0, PlanePoint::origin());
        let measured = BandCounts::aligned(&probes, &unrotated, 0.75);
        assert_eq!(measured.right_front, 2);
        assert_eq!(measured.right_tail, 0);

        let rotated = PivotRotation::new(2.0, PlanePoint::origin());
        let aligned = BandCounts::aligned(&probes, &rotated, 0.75);
        assert_eq!(
            aligned,
            BandCounts {
                left_front: 1,
                left_tail: 1,
                right_front: 1,
                right_tail: 1,
                front: 1,
            }
        );
    }
}

//! Key parameter report files
//!
//! One row per fitted key, followed by the section globals as comment lines:
//!
//! ```text
//! Key,ShoulderType,CenterX,Angle,Width,LeftStep,RightStep
//! 40,both,12.5,-0.12,0.875,0.02,0.015
//! # ShoulderLength,0.635
//! # KeyHeight,0.245
//! ```

use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::{key_shoulders, SectionResult};
use crate::model::parameters::{KEY_HEIGHT, SHOULDER_LENGTH};

const HEADER: [&str; 7] = [
    "Key",
    "ShoulderType",
    "CenterX",
    "Angle",
    "Width",
    "LeftStep",
    "RightStep",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Report file name for a run, e.g. `KeyParameters_Steinway_1_Upper_20250101_120000.csv`
pub fn default_report_name(piano_id: &str, at: DateTime<Local>) -> String {
    format!("KeyParameters_{}_{}.csv", piano_id, at.format("%Y%m%d_%H%M%S"))
}

/// Write the key parameter report for a section
pub fn write_parameters_csv<W: Write>(writer: W, result: &SectionResult) -> Result<W, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for params in result.keys.values() {
        wtr.write_record([
            params.key_number.to_string(),
            key_shoulders(params.key_number).to_string(),
            params.center_x.to_string(),
            params.angle_deg.to_string(),
            params.width.to_string(),
            params.left_step.to_string(),
            params.right_step.to_string(),
        ])?;
    }

    let mut writer = wtr.into_inner().map_err(|e| e.into_error())?;
    writeln!(writer, "# {},{}", SHOULDER_LENGTH, result.global.shoulder_length)?;
    writeln!(writer, "# {},{}", KEY_HEIGHT, result.global.key_height)?;
    Ok(writer)
}

/// Write the report into `dir` under its default name, returning the path
pub fn write_parameters_file(dir: &Path, result: &SectionResult) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(default_report_name(&result.context.piano_id, Local::now()));
    let file = File::create(&path)?;
    let mut file = write_parameters_csv(file, result)?;
    file.flush()?;
    Ok(path)
}

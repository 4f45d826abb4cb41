//! Shared test helpers for integration tests
//!
//! Probe files are generated from straight, evenly spaced keys so the
//! expected fit is known exactly.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get a keyfit command
pub fn keyfit() -> Command {
    Command::new(cargo::cargo_bin!("keyfit"))
}

/// Spacing between key centres (in)
pub const KEY_PITCH: f64 = 0.93;

/// Half width of a generated key (in)
pub const HALF_WIDTH: f64 = 0.45;

/// Edge probe Y positions; the first two fall in the front band
pub const EDGE_YS: [f64; 5] = [0.25, 0.5, 1.0, 1.5, 2.0];

pub const SHOULDER_Y: f64 = 0.6;
pub const HEIGHT_Z: f64 = 0.62;

/// Centre X of a generated key
pub fn key_center(key: u32) -> f64 {
    key as f64 * KEY_PITCH
}

/// Probe rows for one straight key, all five directions
pub fn key_rows(key: u32) -> String {
    let cx = key_center(key);
    let mut rows = String::new();
    for y in EDGE_YS {
        writeln!(rows, "{},1,{},{},0", key, cx - HALF_WIDTH, y).unwrap();
        writeln!(rows, "{},2,{},{},0", key, cx + HALF_WIDTH, y).unwrap();
    }
    writeln!(rows, "{},3,{},0,0", key, cx).unwrap();
    writeln!(rows, "{},4,{},{},0", key, cx, SHOULDER_Y).unwrap();
    writeln!(rows, "{},5,{},1,{}", key, cx, HEIGHT_Z).unwrap();
    rows
}

/// Probe CSV content for the given keys
pub fn probe_csv(keys: &[u32]) -> String {
    let mut content = String::from("PianoKey#,Direction,X,Y,Z\n");
    for key in keys {
        content.push_str(&key_rows(*key));
    }
    content
}

/// Write a probe file named `name` into `dir`
pub fn write_probe_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Temp dir holding `Steinway_100_Upper.csv` with keys 40-47 probed
pub fn setup_section() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let keys: Vec<u32> = (40..=47).collect();
    let path = write_probe_file(tmp.path(), "Steinway_100_Upper.csv", &probe_csv(&keys));
    (tmp, path)
}

//! Probe measurement files and the per-key point table
//!
//! The CNC probing routine writes one row per touch:
//!
//! ```text
//! PianoKey#,Direction,X,Y,Z
//! 40,1,-0.4312,0.2500,0.0000
//! 40,2,0.4298,0.2500,0.0000
//! ```
//!
//! Rows are grouped into a [`ProbeTable`] keyed by key number and probe
//! direction. The table represents exactly one keyboard section and is never
//! mutated after parsing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Header names the probing routine writes
const REQUIRED_COLUMNS: [&str; 4] = ["PianoKey#", "Direction", "X", "Y"];

/// One touch sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ProbePoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Touch position projected onto the keyboard plane
    pub fn plan(&self) -> nalgebra::Point2<f64> {
        nalgebra::Point2::new(self.x, self.y)
    }
}

/// Probe approach direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left edge of the key, probed moving +X
    Left = 1,
    /// Right edge of the key, probed moving -X
    Right = 2,
    /// Front face, probed moving +Y
    Front = 3,
    /// Shoulder (back) face, probed moving -Y
    Shoulder = 4,
    /// Top surface, probed moving -Z
    Height = 5,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Left,
        Direction::Right,
        Direction::Front,
        Direction::Shoulder,
        Direction::Height,
    ];

    /// Map a numeric direction code; codes outside 1-5 are not probe edges
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Direction::Left),
            2 => Some(Direction::Right),
            3 => Some(Direction::Front),
            4 => Some(Direction::Shoulder),
            5 => Some(Direction::Height),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Front => write!(f, "front"),
            Direction::Shoulder => write!(f, "shoulder"),
            Direction::Height => write!(f, "height"),
        }
    }
}

/// All probe points recorded for one key, grouped by direction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyProbes {
    pub left: Vec<ProbePoint>,
    pub right: Vec<ProbePoint>,
    pub front: Vec<ProbePoint>,
    pub shoulder: Vec<ProbePoint>,
    pub height: Vec<ProbePoint>,
}

impl KeyProbes {
    /// Points recorded for a direction, in file order
    pub fn points(&self, direction: Direction) -> &[ProbePoint] {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Front => &self.front,
            Direction::Shoulder => &self.shoulder,
            Direction::Height => &self.height,
        }
    }

    fn points_mut(&mut self, direction: Direction) -> &mut Vec<ProbePoint> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Front => &mut self.front,
            Direction::Shoulder => &mut self.shoulder,
            Direction::Height => &mut self.height,
        }
    }

    /// Total number of recorded points across all directions
    pub fn len(&self) -> usize {
        Direction::ALL.iter().map(|d| self.points(*d).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors raised while reading a probe file
///
/// Any of these aborts the whole section: a partially parsed file would
/// silently shift the global parameters.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Probe file is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Malformed probe row at line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error("Failed to read probe file: {0}")]
    Csv(String),
}

impl From<csv::Error> for ProbeError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => ProbeError::Malformed {
                line: pos.line(),
                message: match err.kind() {
                    csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
                    _ => err.to_string(),
                },
            },
            None => ProbeError::Csv(err.to_string()),
        }
    }
}

/// Raw CSV row as written by the probing routine
#[derive(Debug, Deserialize)]
struct ProbeRecord {
    #[serde(rename = "PianoKey#")]
    key: u32,
    #[serde(rename = "Direction")]
    direction: i64,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(rename = "Z", default)]
    z: Option<f64>,
}

/// Probe points for one keyboard section, keyed by key number
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbeTable {
    keys: BTreeMap<u32, KeyProbes>,
}

impl ProbeTable {
    /// Parse a probe CSV file from disk
    pub fn from_path(path: &Path) -> Result<Self, ProbeError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse probe CSV content from any reader
    ///
    /// Rows with a direction code outside 1-5 are dropped. Every other row
    /// must parse completely or the whole file is rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProbeError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ProbeError::MissingColumn(column.to_string()));
            }
        }

        let mut keys: BTreeMap<u32, KeyProbes> = BTreeMap::new();
        for result in rdr.deserialize::<ProbeRecord>() {
            let record = result?;
            let probes = keys.entry(record.key).or_default();

            if let Some(direction) = Direction::from_code(record.direction) {
                probes.points_mut(direction).push(ProbePoint::new(
                    record.x,
                    record.y,
                    record.z.unwrap_or(0.0),
                ));
            }
        }

        Ok(Self { keys })
    }

    /// Probe points for a key, if the key appears in the file
    pub fn get(&self, key: u32) -> Option<&KeyProbes> {
        self.keys.get(&key)
    }

    /// Key numbers present in the table, ascending
    pub fn key_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.keys.keys().copied()
    }

    /// Iterate keys and their probes in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &KeyProbes)> {
        self.keys.iter().map(|(k, v)| (*k, v))
    }

    /// All points for one direction across every key in the section
    pub fn all_points(&self, direction: Direction) -> impl Iterator<Item = &ProbePoint> {
        self.keys
            .values()
            .flat_map(move |probes| probes.points(direction).iter())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(u32, Direction, ProbePoint)> for ProbeTable {
    fn from_iter<I: IntoIterator<Item = (u32, Direction, ProbePoint)>>(iter: I) -> Self {
        let mut keys: BTreeMap<u32, KeyProbes> = BTreeMap::new();
        for (key, direction, point) in iter {
            keys.entry(key).or_default().points_mut(direction).push(point);
        }
        Self { keys }
    }
}

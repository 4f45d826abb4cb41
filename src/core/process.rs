//! Per-key processing and the section batch
//!
//! A section is processed as one batch from one parsed [`ProbeTable`]. A key
//! without left or right edge points is skipped and reported; it never aborts
//! the other keys.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crate::core::classify::is_white_key;
use crate::core::config::FitConfig;
use crate::core::context::RunContext;
use crate::core::geometry::{centroid, max_x, min_x, PlanePoint};
use crate::core::global::{compute_global_params, GlobalParams};
use crate::core::optimize::{search_angle, AngleFit};
use crate::core::outline::{calculate_outline, KeyParameters, Outline};
use crate::core::probe::{KeyProbes, ProbePoint, ProbeTable};

/// Reasons a single key produces no parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyError {
    #[error("Key {key} was not probed")]
    NotProbed { key: u32 },

    #[error("Key {key} needs both edges probed (left: {left} points, right: {right} points)")]
    InsufficientData { key: u32, left: usize, right: usize },
}

/// Everything computed while fitting one key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFit {
    /// Rotation pivot: centroid of left, right and front points
    pub center: [f64; 2],
    /// Front points were synthesized because none were probed
    pub synthesized_front: bool,
    pub angle: AngleFit,
    pub outline: Outline,
}

fn plan_points(points: &[ProbePoint]) -> Vec<PlanePoint> {
    points.iter().map(ProbePoint::plan).collect()
}

/// Sentinel front points at the fallback Y, spanning the probed edges
fn synthesize_front(left: &[PlanePoint], right: &[PlanePoint], fallback_y: f64) -> Vec<PlanePoint> {
    match (min_x(left), max_x(right)) {
        (Some(left_x), Some(right_x)) => vec![
            PlanePoint::new(left_x, fallback_y),
            PlanePoint::new(right_x, fallback_y),
        ],
        _ => Vec::new(),
    }
}

/// Fit one key, keeping the intermediate results
pub fn fit_key(key: u32, probes: &KeyProbes, config: &FitConfig) -> Result<KeyFit, KeyError> {
    let left = plan_points(&probes.left);
    let right = plan_points(&probes.right);

    if left.is_empty() || right.is_empty() {
        return Err(KeyError::InsufficientData {
            key,
            left: left.len(),
            right: right.len(),
        });
    }

    let mut front = plan_points(&probes.front);
    let synthesized_front = front.is_empty();
    if synthesized_front {
        front = synthesize_front(&left, &right, config.fallback_front_y);
    }

    let insufficient = || KeyError::InsufficientData {
        key,
        left: left.len(),
        right: right.len(),
    };

    let all: Vec<PlanePoint> = left
        .iter()
        .chain(right.iter())
        .chain(front.iter())
        .copied()
        .collect();
    let center = centroid(&all).ok_or_else(insufficient)?;
    let angle = search_angle(&left, &right, center, config).ok_or_else(insufficient)?;
    let outline = calculate_outline(key, &left, &right, &front, center, angle.angle_deg, config)
        .ok_or_else(insufficient)?;

    debug!(
        key,
        center_x = center.x,
        center_y = center.y,
        angle = outline.params.angle_deg,
        width = outline.params.width,
        synthesized_front,
        "fitted key"
    );

    Ok(KeyFit {
        center: [center.x, center.y],
        synthesized_front,
        angle,
        outline,
    })
}

/// Outline parameters for one key
pub fn compute_key_params(
    key: u32,
    probes: &KeyProbes,
    config: &FitConfig,
) -> Result<KeyParameters, KeyError> {
    fit_key(key, probes, config).map(|fit| fit.outline.params)
}

/// A white key that produced no parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedKey {
    pub key: u32,
    pub reason: String,
}

/// Outcome counts for a section batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionReport {
    pub processed_count: usize,
    pub total_white_keys: usize,
    pub skipped: Vec<SkippedKey>,
}

impl SectionReport {
    pub fn is_complete(&self) -> bool {
        self.processed_count == self.total_white_keys
    }
}

/// Global and per-key parameters for one section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub context: RunContext,
    pub global: GlobalParams,
    /// Fitted keys by key number
    pub keys: BTreeMap<u32, KeyParameters>,
    pub report: SectionReport,
}

impl SectionResult {
    pub fn get(&self, key: u32) -> Option<&KeyParameters> {
        self.keys.get(&key)
    }
}

/// Fit every white key in a section
pub fn compute_section(table: &ProbeTable, context: &RunContext, config: &FitConfig) -> SectionResult {
    let span = info_span!("section", piano = %context.piano_id, section = %context.section);
    let _guard = span.enter();

    let global = compute_global_params(table, config);
    info!(
        shoulder_length = global.shoulder_length,
        key_height = global.key_height,
        keys = table.len(),
        "computed global parameters"
    );

    let mut keys = BTreeMap::new();
    let mut report = SectionReport::default();

    for (key, probes) in table.iter().filter(|(key, _)| is_white_key(*key)) {
        report.total_white_keys += 1;
        match compute_key_params(key, probes, config) {
            Ok(params) => {
                keys.insert(key, params);
            }
            Err(err) => {
                warn!(key, "{}", err);
                report.skipped.push(SkippedKey {
                    key,
                    reason: err.to_string(),
                });
            }
        }
    }
    report.processed_count = keys.len();

    info!(
        processed = report.processed_count,
        total = report.total_white_keys,
        "fitted section"
    );

    SectionResult {
        context: context.clone(),
        global,
        keys,
        report,
    }
}

/// Fit a single key from a section table
pub fn compute_key_in_table(
    table: &ProbeTable,
    key: u32,
    config: &FitConfig,
) -> Result<KeyFit, KeyError> {
    let probes = table.get(key).ok_or(KeyError::NotProbed { key })?;
    fit_key(key, probes, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::probe::Direction;

    const YS: [f64; 5] = [0.25, 0.5, 1.0, 1.5, 2.0];

    /// Left edge at -1 and right edge at +1 with ±0.001 probe noise
    fn symmetric_probes(with_front: bool) -> KeyProbes {
        let mut probes = KeyProbes::default();
        for y in YS {
            probes.left.push(ProbePoint::new(-1.001, y, 0.0));
            probes.left.push(ProbePoint::new(-0.999, y, 0.0));
            probes.right.push(ProbePoint::new(1.001, y, 0.0));
            probes.right.push(ProbePoint::new(0.999, y, 0.0));
        }
        if with_front {
            for x in [-0.5, 0.0, 0.5] {
                probes.front.push(ProbePoint::new(x, 0.0, 0.0));
            }
        }
        probes
    }

    #[test]
    fn test_symmetric_key() {
        let config = FitConfig::default();
        let params = compute_key_params(6, &symmetric_probes(true), &config).unwrap();

        assert!(params.angle_deg.abs() < 1e-9);
        assert!(params.center_x.abs() < 1e-9);
        let nominal = 2.0 + config.front_overhang + config.tail_overhang;
        assert!((params.width - nominal).abs() < 0.01, "width = {}", params.width);
        assert!((params.width - (2.002 + 2.0 * config.tail_overhang)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_edge_is_insufficient_regardless_of_front() {
        let config = FitConfig::default();

        let mut no_left = symmetric_probes(true);
        no_left.left.clear();
        assert!(matches!(
            compute_key_params(6, &no_left, &config),
            Err(KeyError::InsufficientData { left: 0, .. })
        ));

        let mut no_right = symmetric_probes(false);
        no_right.right.clear();
        assert!(matches!(
            compute_key_params(6, &no_right, &config),
            Err(KeyError::InsufficientData { right: 0, .. })
        ));
    }

    #[test]
    fn test_missing_front_is_synthesized() {
        let config = FitConfig::default();
        let fit = fit_key(6, &symmetric_probes(false), &config).unwrap();

        assert!(fit.synthesized_front);
        assert!(fit.outline.params.width.is_finite());
        assert!(fit.outline.params.center_x.is_finite());
        assert!((fit.outline.front_y - config.fallback_front_y).abs() < 0.05);
    }

    #[test]
    fn test_section_reports_skipped_keys() {
        let mut rows = Vec::new();
        // Keys 3 and 4 fully probed, key 6 has no right edge, key 5 is black
        for key in [3u32, 4, 5] {
            let offset = key as f64;
            for y in YS {
                rows.push((key, Direction::Left, ProbePoint::new(offset - 0.45, y, 0.0)));
                rows.push((key, Direction::Right, ProbePoint::new(offset + 0.45, y, 0.0)));
            }
            rows.push((key, Direction::Front, ProbePoint::new(offset, -1.2, 0.0)));
            rows.push((key, Direction::Shoulder, ProbePoint::new(offset, 0.6, 0.0)));
            rows.push((key, Direction::Height, ProbePoint::new(offset, 0.5, 0.62)));
        }
        rows.push((6, Direction::Left, ProbePoint::new(5.55, 0.5, 0.0)));
        let table: ProbeTable = rows.into_iter().collect();

        let result = compute_section(&table, &RunContext::default(), &FitConfig::default());

        assert_eq!(result.report.total_white_keys, 3);
        assert_eq!(result.report.processed_count, 2);
        assert_eq!(result.report.skipped.len(), 1);
        assert_eq!(result.report.skipped[0].key, 6);
        assert!(!result.report.is_complete());
        assert!(result.get(5).is_none());
        assert_eq!(result.keys.keys().copied().collect::<Vec<_>>(), vec![3, 4]);
        assert!((result.get(4).unwrap().center_x - 4.0).abs() < 1e-6);
        assert!((result.global.key_height - 0.62).abs() < 1e-12);
    }

    #[test]
    fn test_key_not_in_table() {
        let table = ProbeTable::default();
        assert_eq!(
            compute_key_in_table(&table, 40, &FitConfig::default()),
            Err(KeyError::NotProbed { key: 40 })
        );
    }

    #[test]
    fn test_section_is_deterministic() {
        let table: ProbeTable = YS
            .iter()
            .flat_map(|y| {
                [
                    (8, Direction::Left, ProbePoint::new(-0.44 + y * 0.003, *y, 0.0)),
                    (8, Direction::Right, ProbePoint::new(0.46 + y * 0.002, *y, 0.0)),
                ]
            })
            .collect();
        let config = FitConfig::default();
        let first = compute_section(&table, &RunContext::default(), &config);
        let second = compute_section(&table, &RunContext::default(), &config);
        assert_eq!(first, second);
    }
}

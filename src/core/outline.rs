//! Outline parameters for one key at its fitted rotation
//!
//! In the aligned frame each edge has a front wall and a tail wall. The outer
//! of the two sets the key width; the difference between them is the shoulder
//! step, kept only on sides where the key has a shoulder.

use serde::{Deserialize, Serialize};

use crate::core::classify::key_shoulders;
use crate::core::config::FitConfig;
use crate::core::geometry::{max_x, min_x, PivotRotation, PlanePoint};
use crate::core::optimize::EdgeBands;
use crate::core::stats::median;

/// Fitted outline of one white key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyParameters {
    pub key_number: u32,
    /// World-space X of the key's front reference point (in)
    pub center_x: f64,
    /// Rotation in the outline model's sign convention (deg)
    pub angle_deg: f64,
    /// Outer width including overhangs (in)
    pub width: f64,
    /// Left shoulder step, zero without a left shoulder (in)
    pub left_step: f64,
    /// Right shoulder step, zero without a right shoulder (in)
    pub right_step: f64,
}

/// Edge walls in the aligned frame, already pushed out by the overhangs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Walls {
    pub left_front: f64,
    pub left_tail: f64,
    pub right_front: f64,
    pub right_tail: f64,
}

impl Walls {
    /// Compute walls from rotated edge bands
    ///
    /// A band without points takes the other band's wall on that side, which
    /// leaves no step there. Returns `None` if an edge has no points at all.
    pub fn from_bands(left: &EdgeBands, right: &EdgeBands, config: &FitConfig) -> Option<Self> {
        let left_front = min_x(&left.front).map(|x| x - config.front_overhang);
        let left_tail = min_x(&left.tail).map(|x| x - config.tail_overhang);
        let right_front = max_x(&right.front).map(|x| x + config.front_overhang);
        let right_tail = max_x(&right.tail).map(|x| x + config.tail_overhang);

        let (left_front, left_tail) = paired(left_front, left_tail)?;
        let (right_front, right_tail) = paired(right_front, right_tail)?;

        Some(Self {
            left_front,
            left_tail,
            right_front,
            right_tail,
        })
    }

    pub fn left_outer(&self) -> f64 {
        self.left_front.min(self.left_tail)
    }

    pub fn left_inner(&self) -> f64 {
        self.left_front.max(self.left_tail)
    }

    pub fn right_outer(&self) -> f64 {
        self.right_front.max(self.right_tail)
    }

    pub fn right_inner(&self) -> f64 {
        self.right_front.min(self.right_tail)
    }
}

fn paired(front: Option<f64>, tail: Option<f64>) -> Option<(f64, f64)> {
    match (front, tail) {
        (Some(f), Some(t)) => Some((f, t)),
        (Some(f), None) => Some((f, f)),
        (None, Some(t)) => Some((t, t)),
        (None, None) => None,
    }
}

/// Full outline calculation result, including the intermediate walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    pub params: KeyParameters,
    pub walls: Walls,
    /// Median front-face Y in the aligned frame
    pub front_y: f64,
}

/// Derive the outline of a key from its fitted rotation
///
/// `angle_deg` is the rotation returned by the angle search; the reported
/// angle is its negation. Returns `None` if the left or right edge is empty.
pub fn calculate_outline(
    key_number: u32,
    left_points: &[PlanePoint],
    right_points: &[PlanePoint],
    front_points: &[PlanePoint],
    center: PlanePoint,
    angle_deg: f64,
    config: &FitConfig,
) -> Option<Outline> {
    let rotation = PivotRotation::new(angle_deg, center);

    // Bands are split on the aligned y, not the measured y
    let left = EdgeBands::split(&rotation.apply_all(left_points), config.band_split_y);
    let right = EdgeBands::split(&rotation.apply_all(right_points), config.band_split_y);
    let front = rotation.apply_all(front_points);

    let walls = Walls::from_bands(&left, &right, config)?;
    let front_y = median(&front.iter().map(|p| p.y).collect::<Vec<_>>());

    let unrotate = rotation.inverse();
    let front_left = unrotate.apply(&PlanePoint::new(walls.left_outer(), front_y));
    let front_right = unrotate.apply(&PlanePoint::new(walls.right_outer(), front_y));
    let center_x = (front_left.x + front_right.x) / 2.0;

    let shoulders = key_shoulders(key_number);
    let left_step = if shoulders.has_left() {
        walls.left_inner() - walls.left_outer()
    } else {
        0.0
    };
    let right_step = if shoulders.has_right() {
        walls.right_outer() - walls.right_inner()
    } else {
        0.0
    };

    Some(Outline {
        params: KeyParameters {
            key_number,
            center_x,
            // Subtracting from zero keeps an unrotated key at +0
            angle_deg: 0.0 - angle_deg,
            width: walls.right_outer() - walls.left_outer(),
            left_step,
            right_step,
        },
        walls,
        front_y,
    })
}

/// Outline parameters of a key at the given fitted rotation
pub fn calculate_key_params(
    key_number: u32,
    left_points: &[PlanePoint],
    right_points: &[PlanePoint],
    front_points: &[PlanePoint],
    center: PlanePoint,
    angle_deg: f64,
    config: &FitConfig,
) -> Option<KeyParameters> {
    calculate_outline(
        key_number,
        left_points,
        right_points,
        front_points,
        center,
        angle_deg,
        config,
    )
    .map(|outline| outline.params)
}

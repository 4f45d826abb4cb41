//! Rotation search for a single key
//!
//! A key sits slightly rotated on the keyframe. The search finds the rotation
//! that lets the probed left and right edge points lie most nearly flush
//! against two straight walls. Slack is the total inward distance the points
//! would have to move to touch their wall:
//!
//! ```text
//! slack = Σ max(0, x - xl_outer)  over left points
//!       + Σ max(0, xr_outer - x)  over right points
//! metric = front_slack + tail_weight * tail_slack
//! ```
//!
//! The metric is neither smooth nor convex in the angle, so every angle on the
//! grid is evaluated. Angles are visited in ascending order and only a strictly
//! smaller metric replaces the best, so ties resolve to the most negative angle.

use serde::Serialize;

use crate::core::config::FitConfig;
use crate::core::geometry::{max_x, min_x, PivotRotation, PlanePoint};

/// Edge points split at `band_split_y`
///
/// A point exactly on the split belongs to the front band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeBands {
    pub front: Vec<PlanePoint>,
    pub tail: Vec<PlanePoint>,
}

impl EdgeBands {
    pub fn split(points: &[PlanePoint], band_split_y: f64) -> Self {
        let (front, tail) = points.iter().partition(|p| p.y <= band_split_y);
        Self { front, tail }
    }

    pub fn rotated(&self, rotation: &PivotRotation) -> Self {
        Self {
            front: rotation.apply_all(&self.front),
            tail: rotation.apply_all(&self.tail),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &PlanePoint> {
        self.front.iter().chain(self.tail.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.tail.is_empty()
    }
}

/// Best rotation found by the search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleFit {
    /// Rotation (degrees, counter-clockwise) that aligns the key edges
    pub angle_deg: f64,
    /// Weighted slack at that rotation
    pub metric: f64,
    /// Number of candidate angles evaluated
    pub candidates: usize,
}

fn left_slack(points: &[PlanePoint], wall: f64) -> f64 {
    points.iter().map(|p| (p.x - wall).max(0.0)).sum()
}

fn right_slack(points: &[PlanePoint], wall: f64) -> f64 {
    points.iter().map(|p| (wall - p.x).max(0.0)).sum()
}

/// Weighted slack for one candidate rotation
pub fn slack_metric(
    left: &EdgeBands,
    right: &EdgeBands,
    rotation: &PivotRotation,
    tail_weight: f64,
) -> f64 {
    let left = left.rotated(rotation);
    let right = right.rotated(rotation);

    let (Some(xl_outer), Some(xr_outer)) = (min_x(left.all()), max_x(right.all())) else {
        return 0.0;
    };

    let front_slack = left_slack(&left.front, xl_outer) + right_slack(&right.front, xr_outer);
    let tail_slack = left_slack(&left.tail, xl_outer) + right_slack(&right.tail, xr_outer);

    front_slack + tail_weight * tail_slack
}

/// Search the angle grid, returning `None` if either edge has no points
pub fn search_angle(
    left_points: &[PlanePoint],
    right_points: &[PlanePoint],
    center: PlanePoint,
    config: &FitConfig,
) -> Option<AngleFit> {
    if left_points.is_empty() || right_points.is_empty() {
        return None;
    }

    let left = EdgeBands::split(left_points, config.band_split_y);
    let right = EdgeBands::split(right_points, config.band_split_y);

    let half_steps = config.half_steps();
    let mut best = AngleFit {
        angle_deg: 0.0,
        metric: f64::INFINITY,
        candidates: 0,
    };

    for step in -half_steps..=half_steps {
        let angle = step as f64 * config.angle_step;
        let rotation = PivotRotation::new(angle, center);
        let metric = slack_metric(&left, &right, &rotation, config.tail_weight);

        best.candidates += 1;
        if metric < best.metric {
            best.metric = metric;
            best.angle_deg = angle;
        }
    }

    Some(best)
}

/// Rotation (degrees) minimizing the weighted edge slack
///
/// Returns `0.0` when either edge has no points; callers treat that key as
/// unprocessable before getting here.
pub fn optimize_angle(
    left_points: &[PlanePoint],
    right_points: &[PlanePoint],
    center: PlanePoint,
    config: &FitConfig,
) -> f64 {
    search_angle(left_points, right_points, center, config)
        .map(|fit| fit.angle_deg)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::centroid;

    /// Straight edge at `x` through the given y values
    fn edge(x: f64, ys: &[f64]) -> Vec<PlanePoint> {
        ys.iter().map(|y| PlanePoint::new(x, *y)).collect()
    }

    /// Rotate points about `center` by `angle_deg`
    fn tilt(points: &[PlanePoint], angle_deg: f64, center: PlanePoint) -> Vec<PlanePoint> {
        PivotRotation::new(angle_deg, center).apply_all(points)
    }

    const YS: [f64; 6] = [0.2, 0.5, 0.75, 1.5, 2.5, 3.5];

    #[test]
    fn test_band_split_boundary_is_front() {
        let bands = EdgeBands::split(&edge(0.0, &[0.74, 0.75, 0.76]), 0.75);
        assert_eq!(bands.front.len(), 2);
        assert_eq!(bands.tail.len(), 1);
    }

    #[test]
    fn test_straight_edges_need_no_rotation() {
        let left = edge(-0.45, &YS);
        let right = edge(0.45, &YS);
        let all: Vec<_> = left.iter().chain(right.iter()).copied().collect();
        let center = centroid(&all).unwrap();

        let fit = search_angle(&left, &right, center, &FitConfig::default()).unwrap();
        assert_eq!(fit.angle_deg, 0.0);
        assert!(fit.metric.abs() < 1e-12);
        assert_eq!(fit.candidates, 401);
    }

    #[test]
    fn test_recovers_applied_rotation() {
        let config = FitConfig::default();
        let left = edge(-0.45, &YS);
        let right = edge(0.45, &YS);
        let all: Vec<_> = left.iter().chain(right.iter()).copied().collect();
        let center = centroid(&all).unwrap();

        // Key physically rotated by -0.8 degrees; the fit rotates it back
        let left = tilt(&left, -0.8, center);
        let right = tilt(&right, -0.8, center);

        let angle = optimize_angle(&left, &right, center, &config);
        assert!((angle - 0.8).abs() < config.angle_step * 1.5, "angle = {}", angle);
    }

    #[test]
    fn test_empty_edge_returns_zero() {
        let config = FitConfig::default();
        let right = edge(0.45, &YS);
        assert_eq!(optimize_angle(&[], &right, PlanePoint::origin(), &config), 0.0);
        assert_eq!(optimize_angle(&right, &[], PlanePoint::origin(), &config), 0.0);
        assert!(search_angle(&[], &[], PlanePoint::origin(), &config).is_none());
    }

    #[test]
    fn test_result_on_grid_and_in_range() {
        let config = FitConfig {
            max_rotation: 1.0,
            angle_step: 0.05,
            ..FitConfig::default()
        };

        let cases: Vec<(Vec<PlanePoint>, Vec<PlanePoint>)> = vec![
            (edge(-0.4, &YS), edge(0.4, &YS)),
            (tilt(&edge(-0.4, &YS), 5.0, PlanePoint::origin()), edge(0.4, &YS)),
            (
                vec![PlanePoint::new(-0.41, 0.1), PlanePoint::new(-0.38, 2.9)],
                vec![PlanePoint::new(0.39, 0.6), PlanePoint::new(0.44, 1.7)],
            ),
            (edge(-0.4, &[1.0]), edge(0.4, &[1.0])),
        ];

        for (left, right) in cases {
            let all: Vec<_> = left.iter().chain(right.iter()).copied().collect();
            let center = centroid(&all).unwrap();
            let angle = optimize_angle(&left, &right, center, &config);

            assert!(angle.abs() <= config.max_rotation + 1e-9);
            let steps = angle / config.angle_step;
            assert!((steps - steps.round()).abs() < 1e-6, "angle {} off grid", angle);
        }
    }

    #[test]
    fn test_ties_resolve_to_first_angle() {
        // A single point per edge is flush at every angle
        let config = FitConfig {
            max_rotation: 0.5,
            angle_step: 0.1,
            ..FitConfig::default()
        };
        let left = edge(-0.4, &[0.3]);
        let right = edge(0.4, &[0.3]);

        let angle = optimize_angle(&left, &right, PlanePoint::new(0.0, 0.3), &config);
        assert!((angle - -0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tail_slack_weighted() {
        let left = EdgeBands::split(&edge(-0.4, &[0.2]), 0.75);
        let mut right = EdgeBands::split(&edge(0.4, &[0.2, 1.0]), 0.75);
        right.tail[0].x = 0.3;

        let identity = PivotRotation::new(0.0, PlanePoint::origin());
        let unweighted = slack_metric(&left, &right, &identity, 1.0);
        let weighted = slack_metric(&left, &right, &identity, 3.0);
        assert!((unweighted - 0.1).abs() < 1e-12);
        assert!((weighted - 0.3).abs() < 1e-12);
    }
}

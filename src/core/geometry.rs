//! Plane rotation helpers for the keyboard XY plane

use nalgebra::{Point2, Rotation2};

/// A point in the keyboard plane (inches)
pub type PlanePoint = Point2<f64>;

/// Rotation by a fixed angle about a fixed center
///
/// The sine and cosine are computed once per angle, so a candidate angle can be
/// applied to every point of a key without recomputing them.
#[derive(Debug, Clone, Copy)]
pub struct PivotRotation {
    rotation: Rotation2<f64>,
    center: PlanePoint,
}

impl PivotRotation {
    /// Counter-clockwise rotation by `angle_deg` degrees about `center`
    pub fn new(angle_deg: f64, center: PlanePoint) -> Self {
        Self {
            rotation: Rotation2::new(angle_deg.to_radians()),
            center,
        }
    }

    pub fn apply(&self, point: &PlanePoint) -> PlanePoint {
        self.center + self.rotation * (point - self.center)
    }

    pub fn apply_all(&self, points: &[PlanePoint]) -> Vec<PlanePoint> {
        points.iter().map(|p| self.apply(p)).collect()
    }

    /// The rotation that undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            rotation: self.rotation.inverse(),
            center: self.center,
        }
    }
}

/// Arithmetic mean of a set of points, `None` when empty
pub fn centroid(points: &[PlanePoint]) -> Option<PlanePoint> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(PlanePoint::new(sx / n, sy / n))
}

/// Smallest x coordinate, `None` when empty
pub fn min_x<'a>(points: impl IntoIterator<Item = &'a PlanePoint>) -> Option<f64> {
    points.into_iter().map(|p| p.x).reduce(f64::min)
}

/// Largest x coordinate, `None` when empty
pub fn max_x<'a>(points: impl IntoIterator<Item = &'a PlanePoint>) -> Option<f64> {
    points.into_iter().map(|p| p.x).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &PlanePoint, b: &PlanePoint) -> bool {
        (a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12
    }

    #[test]
    fn test_quarter_turn_about_origin() {
        let rot = PivotRotation::new(90.0, PlanePoint::origin());
        let p = rot.apply(&PlanePoint::new(1.0, 0.0));
        assert!(close(&p, &PlanePoint::new(0.0, 1.0)));
    }

    #[test]
    fn test_rotation_about_offset_center() {
        let center = PlanePoint::new(2.0, 3.0);
        let rot = PivotRotation::new(180.0, center);
        let p = rot.apply(&PlanePoint::new(3.0, 3.0));
        assert!(close(&p, &PlanePoint::new(1.0, 3.0)));
        assert!(close(&rot.apply(&center), &center));
    }

    #[test]
    fn test_inverse_round_trips() {
        let rot = PivotRotation::new(1.37, PlanePoint::new(0.1, 0.9));
        let p = PlanePoint::new(-0.43, 2.1);
        assert!(close(&rot.inverse().apply(&rot.apply(&p)), &p));
    }

    #[test]
    fn test_centroid() {
        let points = [
            PlanePoint::new(0.0, 0.0),
            PlanePoint::new(2.0, 0.0),
            PlanePoint::new(1.0, 3.0),
        ];
        assert!(close(&centroid(&points).unwrap(), &PlanePoint::new(1.0, 1.0)));
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_extremes() {
        let points = [PlanePoint::new(-1.0, 0.0), PlanePoint::new(0.5, 1.0)];
        assert_eq!(min_x(&points), Some(-1.0));
        assert_eq!(max_x(&points), Some(0.5));
        assert_eq!(min_x(&[]), None);
    }
}

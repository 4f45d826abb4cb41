//! Robust aggregate statistics
//!
//! Probe touches occasionally land on a burr or a chip in the key edge, so the
//! fitting engine aggregates with order statistics instead of plain means.

use std::cmp::Ordering;

/// Sort a copy of the values in ascending order (NaN sorts as equal)
fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Median of a set of values
///
/// Returns the middle element for odd lengths, the average of the two middle
/// elements for even lengths, and `0.0` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Percentile of a set of values, `p` in the range 0-100
///
/// Linear interpolation between the floor and ceiling ranks at position
/// `(n - 1) * p / 100`. Returns `0.0` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted(values);
    let n = sorted.len();
    let rank = (n - 1) as f64 * p / 100.0;
    let floor = (rank.floor().max(0.0) as usize).min(n - 1);
    let ceil = if floor + 1 < n { floor + 1 } else { floor };

    sorted[floor] + (rank - floor as f64) * (sorted[ceil] - sorted[floor])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_even_length() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_median_empty_is_zero() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_median_ignores_input_order() {
        assert_eq!(median(&[9.0, -1.0, 4.0, 3.0, 100.0]), 4.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        assert!((percentile(&[1.0, 2.0, 3.0, 4.0], 75.0) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_empty_is_zero() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_extremes() {
        let values = [5.0, 1.0, 3.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 5.0);
        assert_eq!(percentile(&values, 50.0), median(&values));
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[0.42], 75.0), 0.42);
    }

    #[test]
    fn test_outlier_does_not_move_median() {
        let clean = [0.70, 0.71, 0.72, 0.71, 0.70];
        let with_outlier = [0.70, 0.71, 0.72, 0.71, 9.0];
        assert!((median(&clean) - median(&with_outlier)).abs() < 0.011);
    }
}

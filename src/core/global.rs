//! Section-wide parameters shared by every key outline

use serde::{Deserialize, Serialize};

use crate::core::config::FitConfig;
use crate::core::probe::{Direction, ProbeTable};
use crate::core::stats::{median, percentile};

/// Percentile of shoulder-face Y used for the shoulder length
///
/// The shoulder probe compresses the felt under the key slightly, so the upper
/// quartile is used instead of the median.
pub const SHOULDER_PERCENTILE: f64 = 75.0;

/// Parameters computed once per section from every probed key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalParams {
    /// Distance from the key front to the shoulder cut, including plastic (in)
    pub shoulder_length: f64,
    /// Keytop height (in)
    pub key_height: f64,
}

/// Compute the shoulder length and key height for a section
pub fn compute_global_params(table: &ProbeTable, config: &FitConfig) -> GlobalParams {
    let front_y: Vec<f64> = table.all_points(Direction::Front).map(|p| p.y).collect();
    let shoulder_y: Vec<f64> = table.all_points(Direction::Shoulder).map(|p| p.y).collect();
    let height_z: Vec<f64> = table.all_points(Direction::Height).map(|p| p.z).collect();

    let shoulder_length = if front_y.is_empty() || shoulder_y.is_empty() {
        0.0
    } else {
        (percentile(&shoulder_y, SHOULDER_PERCENTILE) - median(&front_y)).abs()
            + config.plastic_thickness
    };

    let key_height = if height_z.is_empty() {
        0.0
    } else {
        median(&height_z) - config.key_height_offset
    };

    GlobalParams {
        shoulder_length,
        key_height,
    }
}

//! Core module - probe data, fitting engine and run configuration

pub mod classify;
pub mod config;
pub mod context;
pub mod discover;
pub mod geometry;
pub mod global;
pub mod optimize;
pub mod outline;
pub mod probe;
pub mod process;
pub mod stats;

pub use classify::{is_white_key, key_shoulders, note_name, ShoulderType, FIRST_KEY, LAST_KEY};
pub use config::{ConfigError, FitConfig};
pub use context::{RunContext, Section};
pub use discover::{find_latest_probe_csv, DiscoverError};
pub use geometry::{PivotRotation, PlanePoint};
pub use global::{compute_global_params, GlobalParams};
pub use optimize::{optimize_angle, search_angle, AngleFit, EdgeBands};
pub use outline::{calculate_key_params, calculate_outline, KeyParameters, Outline, Walls};
pub use probe::{Direction, KeyProbes, ProbeError, ProbePoint, ProbeTable};
pub use process::{
    compute_key_in_table, compute_key_params, compute_section, fit_key, KeyError, KeyFit,
    SectionReport, SectionResult, SkippedKey,
};
pub use stats::{median, percentile};

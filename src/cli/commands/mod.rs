//! CLI command implementations

pub mod completions;
pub mod fit;
pub mod key;
pub mod keys;
pub mod params;

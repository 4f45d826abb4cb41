//! keyfit: piano keytop fitting from CMM probe data
//!
//! Turns the probe points captured on one keyboard section into the global
//! and per-key parameters of a parametric keytop outline model.

pub mod cli;
pub mod core;
pub mod model;
pub mod yaml;

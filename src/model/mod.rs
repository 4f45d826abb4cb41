//! Outline model interface - named parameters and parameter reports

pub mod export;
pub mod parameters;

pub use export::{default_report_name, write_parameters_csv, write_parameters_file, ExportError};
pub use parameters::{
    key_parameter_name, model_parameters, KeyAttribute, ModelParameter, Unit, KEY_HEIGHT,
    SHOULDER_LENGTH,
};

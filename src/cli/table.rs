//! Boxed table rendering for `--format table`

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_angle, format_length};
use crate::core::{is_white_key, key_shoulders, note_name, KeyParameters};
use crate::model::ModelParameter;

#[derive(Tabled)]
pub struct KeyParamsRow {
    #[tabled(rename = "Key")]
    pub key: u32,
    #[tabled(rename = "Note")]
    pub note: &'static str,
    #[tabled(rename = "Shoulders")]
    pub shoulders: String,
    #[tabled(rename = "CenterX")]
    pub center_x: String,
    #[tabled(rename = "Angle")]
    pub angle: String,
    #[tabled(rename = "Width")]
    pub width: String,
    #[tabled(rename = "LStep")]
    pub left_step: String,
    #[tabled(rename = "RStep")]
    pub right_step: String,
}

impl From<&KeyParameters> for KeyParamsRow {
    fn from(params: &KeyParameters) -> Self {
        Self {
            key: params.key_number,
            note: note_name(params.key_number),
            shoulders: key_shoulders(params.key_number).to_string(),
            center_x: format_length(params.center_x),
            angle: format_angle(params.angle_deg),
            width: format_length(params.width),
            left_step: format_length(params.left_step),
            right_step: format_length(params.right_step),
        }
    }
}

#[derive(Tabled)]
pub struct KeyClassRow {
    #[tabled(rename = "Key")]
    pub key: u32,
    #[tabled(rename = "Note")]
    pub note: &'static str,
    #[tabled(rename = "Color")]
    pub color: &'static str,
    #[tabled(rename = "Shoulders")]
    pub shoulders: String,
}

impl KeyClassRow {
    pub fn new(key: u32) -> Self {
        Self {
            key,
            note: note_name(key),
            color: if is_white_key(key) { "white" } else { "black" },
            shoulders: key_shoulders(key).to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct ParameterRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Expression")]
    pub expression: String,
}

impl From<&ModelParameter> for ParameterRow {
    fn from(param: &ModelParameter) -> Self {
        Self {
            name: param.name.clone(),
            expression: param.expression(),
        }
    }
}

/// Render rows with the shared table style
pub fn render_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_key_classes() {
        let out = render_table((1..=3).map(KeyClassRow::new));
        assert!(out.contains("Shoulders"));
        assert!(out.contains("A#"));
        assert!(out.contains("black"));
    }
}

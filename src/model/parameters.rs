//! Named parameters of the parametric keytop model
//!
//! The CAD model exposes user parameters named by key number and attribute:
//!
//! ```text
//! ShoulderLength   KeyHeight
//! Key40X   Key40Angle   Key40Width   Key40LStep   Key40RStep
//! ```
//!
//! Lengths are set as `"<value> in"` expressions and angles as `"<value> deg"`.

use serde::Serialize;

use crate::core::{GlobalParams, KeyParameters};

pub const SHOULDER_LENGTH: &str = "ShoulderLength";
pub const KEY_HEIGHT: &str = "KeyHeight";

/// Unit of a model parameter expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Inch,
    Degree,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Inch => write!(f, "in"),
            Unit::Degree => write!(f, "deg"),
        }
    }
}

/// Per-key attribute of the outline model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAttribute {
    X,
    Angle,
    Width,
    LStep,
    RStep,
}

impl KeyAttribute {
    pub const ALL: [KeyAttribute; 5] = [
        KeyAttribute::X,
        KeyAttribute::Angle,
        KeyAttribute::Width,
        KeyAttribute::LStep,
        KeyAttribute::RStep,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            KeyAttribute::X => "X",
            KeyAttribute::Angle => "Angle",
            KeyAttribute::Width => "Width",
            KeyAttribute::LStep => "LStep",
            KeyAttribute::RStep => "RStep",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            KeyAttribute::Angle => Unit::Degree,
            _ => Unit::Inch,
        }
    }

    fn value(self, params: &KeyParameters) -> f64 {
        match self {
            KeyAttribute::X => params.center_x,
            KeyAttribute::Angle => params.angle_deg,
            KeyAttribute::Width => params.width,
            KeyAttribute::LStep => params.left_step,
            KeyAttribute::RStep => params.right_step,
        }
    }
}

/// Model parameter name for a key attribute, e.g. `Key40Width`
pub fn key_parameter_name(key: u32, attribute: KeyAttribute) -> String {
    format!("Key{}{}", key, attribute.suffix())
}

/// One named model parameter with its value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParameter {
    pub name: String,
    pub value: f64,
    pub unit: Unit,
}

impl ModelParameter {
    pub fn new(name: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
        }
    }

    /// Expression text the model accepts, e.g. `"0.635 in"`
    pub fn expression(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

/// Every model parameter for a section: globals first, then keys in the given order
///
/// Zero-valued steps are included so a key that lost its step overwrites the
/// previous value in the model.
pub fn model_parameters<'a>(
    global: &GlobalParams,
    keys: impl IntoIterator<Item = &'a KeyParameters>,
) -> Vec<ModelParameter> {
    let mut parameters = vec![
        ModelParameter::new(SHOULDER_LENGTH, global.shoulder_length, Unit::Inch),
        ModelParameter::new(KEY_HEIGHT, global.key_height, Unit::Inch),
    ];

    for params in keys {
        for attribute in KeyAttribute::ALL {
            parameters.push(ModelParameter::new(
                key_parameter_name(params.key_number, attribute),
                attribute.value(params),
                attribute.unit(),
            ));
        }
    }

    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> KeyParameters {
        KeyParameters {
            key_number: 40,
            center_x: 12.5,
            angle_deg: -0.12,
            width: 0.875,
            left_step: 0.02,
            right_step: 0.0,
        }
    }

    #[test]
    fn test_parameter_names() {
        assert_eq!(key_parameter_name(40, KeyAttribute::X), "Key40X");
        assert_eq!(key_parameter_name(1, KeyAttribute::RStep), "Key1RStep");
    }

    #[test]
    fn test_model_parameters_order_and_units() {
        let global = GlobalParams {
            shoulder_length: 0.635,
            key_height: 0.245,
        };
        let parameters = model_parameters(&global, &[sample_key()]);

        assert_eq!(parameters.len(), 7);
        assert_eq!(parameters[0].name, SHOULDER_LENGTH);
        assert_eq!(parameters[0].expression(), "0.635 in");
        assert_eq!(parameters[1].name, KEY_HEIGHT);

        let angle = parameters.iter().find(|p| p.name == "Key40Angle").unwrap();
        assert_eq!(angle.expression(), "-0.12 deg");
    }

    #[test]
    fn test_zero_step_still_emitted() {
        let global = GlobalParams {
            shoulder_length: 0.0,
            key_height: 0.0,
        };
        let parameters = model_parameters(&global, &[sample_key()]);
        let rstep = parameters.iter().find(|p| p.name == "Key40RStep").unwrap();
        assert_eq!(rstep.value, 0.0);
        assert_eq!(rstep.expression(), "0 in");
    }
}

//! Typed loading of keyfit YAML files
//!
//! Config files are often edited on Windows, so a leading byte order mark is
//! ignored. Errors carry the file name and content for `miette` to render.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Deserialize YAML `content`, naming `filename` in any error
pub fn parse_yaml<T: DeserializeOwned>(content: &str, filename: &str) -> Result<T, YamlError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    serde_yml::from_str(content)
        .map_err(|e| YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename)))
}

/// Read and deserialize a YAML file such as `keyfit.yaml`
pub fn parse_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path).map_err(|source| YamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FitConfig;

    #[test]
    fn test_parse_valid_config() {
        let yaml = "angle_step: 0.02\nfront_overhang: 0.004";
        let result: FitConfig = parse_yaml(yaml, "keyfit.yaml").unwrap();
        assert_eq!(result.angle_step, 0.02);
        assert_eq!(result.front_overhang, 0.004);
    }

    #[test]
    fn test_parse_invalid_yaml_returns_error() {
        let yaml = "angle_step: 0.02\n  invalid indentation";
        let result: Result<FitConfig, _> = parse_yaml(yaml, "keyfit.yaml");
        assert!(matches!(result, Err(YamlError::Syntax(_))));
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let yaml = "\u{feff}tail_weight: 4";
        let result: FitConfig = parse_yaml(yaml, "keyfit.yaml").unwrap();
        assert_eq!(result.tail_weight, 4.0);
    }

    #[test]
    fn test_unreadable_file_names_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing.yaml");
        let err = parse_yaml_file::<FitConfig>(&path).unwrap_err();
        assert!(matches!(err, YamlError::Read { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_wrong_type_reports_filename() {
        let yaml = "angle_step: fast";
        let err = parse_yaml::<FitConfig>(yaml, "keyfit.yaml").unwrap_err();
        assert!(err.to_string().contains("keyfit.yaml"));
    }
}

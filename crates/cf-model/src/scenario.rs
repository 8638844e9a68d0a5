//! Scenario files: YAML parameter sets read at startup.

use std::path::Path;

use crate::error::ModelResult;
use crate::params::FlowParams;

/// Parse and validate parameters from YAML text.
pub fn from_yaml_str(content: &str) -> ModelResult<FlowParams> {
    let params: FlowParams = serde_yaml::from_str(content)?;
    params.validate()?;
    Ok(params)
}

pub fn load_yaml(path: &Path) -> ModelResult<FlowParams> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    #[test]
    fn full_scenario() {
        let p = from_yaml_str("efficiency: 0.75\nbase_capacity: 20\ncrisis_enabled: true\n").unwrap();
        assert_eq!(p.efficiency, 0.75);
        assert_eq!(p.base_capacity, 20);
        assert!(p.crisis_enabled);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p = from_yaml_str("crisis_enabled: true\n").unwrap();
        assert_eq!(p.efficiency, 0.6);
        assert_eq!(p.base_capacity, 10);
        assert!(p.crisis_enabled);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = from_yaml_str("efficiency: 0.5\nspeed: 3\n").unwrap_err();
        assert!(matches!(err, ModelError::Yaml(_)));
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let err = from_yaml_str("base_capacity: 40\n").unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                field: "base_capacity",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_yaml(Path::new("/nonexistent/scenario.yaml")).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}

//! Loading calibration configuration from YAML files

use calibrar_common::{CalibrarError, Result};
use std::fs;
use std::path::Path;

use super::schema::CalibrationSpec;
use super::validate::validate_spec;

/// Parse and validate a YAML calibration config held in memory
pub fn parse_spec(yaml: &str, origin: &Path) -> Result<CalibrationSpec> {
    let spec: CalibrationSpec =
        serde_yaml::from_str(yaml).map_err(|e| CalibrarError::ConfigParsing {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_spec(&spec).map_err(|e| CalibrarError::ConfigValue {
        field: e.field().to_string(),
        message: e.to_string(),
        suggestion: e.suggestion().to_string(),
    })?;

    Ok(spec)
}

/// Load a calibration config from a YAML file
///
/// # Example
///
/// ```no_run
/// use calibrar::config::load_spec;
///
/// let spec = load_spec("calibration.yaml")?;
/// let codes = spec.precision.code_range()?;
/// # Ok::<(), calibrar_common::CalibrarError>(())
/// ```
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<CalibrationSpec> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CalibrarError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let yaml = fs::read_to_string(path)
        .map_err(|e| CalibrarError::io(format!("reading config {}", path.display()), e))?;
    parse_spec(&yaml, path)
}

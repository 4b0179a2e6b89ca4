//! Parameter file loading
//!
//! Parameter files are passed to the node untouched. Their contents are
//! only read so the record can carry them in `file_data`.

use crate::error::ParamFileError;
use serde_yaml::Value;
use std::{fs, path::Path};

/// Read a parameter file and check that it is well-formed YAML.
/// Returns the file contents unchanged.
pub fn load_param_file_data(path: &Path) -> Result<String, ParamFileError> {
    let content = fs::read_to_string(path)?;
    let _: Value = serde_yaml::from_str(&content)?;
    Ok(content)
}

//! Error types for mavros_bridge_launch

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubstitutionError {
    #[error("Undefined variable: '{0}'. Did you forget to declare it as a launch argument?")]
    UndefinedVariable(String),

    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Failed to evaluate expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("Launch argument '{0}' has no default value and was not provided")]
    MissingArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ParamFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

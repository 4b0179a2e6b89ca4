//! Substitution types

use crate::error::SubstitutionError;
use crate::substitution::context::LaunchContext;
use crate::substitution::eval::evaluate_expression;

/// Substitution enum representing different types of substitutions
#[derive(Debug, Clone, PartialEq)]
pub enum Substitution {
    /// Plain text (no substitution)
    Text(String),
    /// Value of a launch configuration (declared argument)
    LaunchConfiguration(String),
    /// Share directory of an installed package
    FindPackageShare(String),
    /// Path components joined with '/'
    PathJoin(Vec<Vec<Substitution>>),
    /// Expression assembled from the fragments and evaluated after resolution
    PythonExpression(Vec<Substitution>),
}

impl Substitution {
    pub fn text(s: impl Into<String>) -> Self {
        Substitution::Text(s.into())
    }

    pub fn configuration(name: impl Into<String>) -> Self {
        Substitution::LaunchConfiguration(name.into())
    }

    /// Resolve substitution to string value
    pub fn resolve(&self, context: &LaunchContext) -> Result<String, SubstitutionError> {
        match self {
            Substitution::Text(s) => Ok(s.clone()),
            Substitution::LaunchConfiguration(name) => context
                .get_configuration(name)
                .ok_or_else(|| SubstitutionError::UndefinedVariable(name.clone())),
            Substitution::FindPackageShare(package_name) => context
                .find_package_share(package_name)
                .map(|path| path.to_string_lossy().into_owned())
                .ok_or_else(|| SubstitutionError::PackageNotFound(package_name.clone())),
            Substitution::PathJoin(parts) => {
                let parts = parts
                    .iter()
                    .map(|part| resolve_substitutions(part, context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(parts.join("/"))
            }
            Substitution::PythonExpression(subs) => {
                let expr = resolve_substitutions(subs, context)?;
                log::trace!("Evaluating expression: {}", expr);
                evaluate_expression(&expr)
            }
        }
    }
}

/// Resolve list of substitutions to single string
pub fn resolve_substitutions(
    subs: &[Substitution],
    context: &LaunchContext,
) -> Result<String, SubstitutionError> {
    let mut result = String::new();
    for sub in subs {
        result.push_str(&sub.resolve(context)?);
    }
    Ok(result)
}

//! Launch context for managing configurations

use crate::package;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Launch context holding resolved configurations and package search prefixes
#[derive(Debug, Clone)]
pub struct LaunchContext {
    configurations: HashMap<String, String>,
    prefixes: Vec<PathBuf>,
}

impl LaunchContext {
    /// Context searching the prefixes found in the process environment
    pub fn new() -> Self {
        Self::with_prefixes(package::default_prefixes())
    }

    pub fn with_prefixes(prefixes: Vec<PathBuf>) -> Self {
        Self {
            configurations: HashMap::new(),
            prefixes,
        }
    }

    pub fn set_configuration(&mut self, name: String, value: String) {
        self.configurations.insert(name, value);
    }

    pub fn get_configuration(&self, name: &str) -> Option<String> {
        self.configurations.get(name).cloned()
    }

    pub fn configurations(&self) -> &HashMap<String, String> {
        &self.configurations
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    pub fn find_package_share(&self, package_name: &str) -> Option<PathBuf> {
        package::find_package_share(&self.prefixes, package_name)
    }

    pub fn find_executable(&self, package_name: &str, executable: &str) -> Option<PathBuf> {
        package::find_executable(&self.prefixes, package_name, executable)
    }

    /// Fallback location of an executable when no prefix provides it
    pub fn expected_executable_path(&self, package_name: &str, executable: &str) -> PathBuf {
        let prefix = self
            .prefixes
            .first()
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new("/opt/ros/humble"));
        prefix.join("lib").join(package_name).join(executable)
    }
}

impl Default for LaunchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a node namespace into its absolute form.
///
/// Relative namespaces are placed under the root namespace and trailing
/// slashes are removed. An empty namespace is the root namespace.
pub fn absolute_namespace(ns: &str) -> String {
    let trimmed = ns.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return "/".to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

//! Node action implementation

use crate::error::SubstitutionError;
use crate::substitution::{resolve_substitutions, LaunchContext, Substitution};
use std::fmt;

/// Node action describing one ROS 2 process to spawn
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAction {
    pub package: Vec<Substitution>,
    pub executable: Vec<Substitution>,
    pub name: Option<Vec<Substitution>>,
    pub namespace: Option<Vec<Substitution>>,
    pub arguments: Vec<Vec<Substitution>>,
    pub parameters: Vec<ParameterEntry>,
    pub remappings: Vec<Remapping>,
    pub output: OutputMode,
}

impl NodeAction {
    pub fn new(package: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            package: vec![Substitution::Text(package.into())],
            executable: vec![Substitution::Text(executable.into())],
            name: None,
            namespace: None,
            arguments: Vec::new(),
            parameters: Vec::new(),
            remappings: Vec::new(),
            output: OutputMode::default(),
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(vec![Substitution::Text(namespace.into())]);
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<Vec<Substitution>>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterEntry>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_remapping(mut self, from: impl Into<String>, to: Vec<Substitution>) -> Self {
        self.remappings.push(Remapping {
            from: vec![Substitution::Text(from.into())],
            to,
        });
        self
    }

    /// Inline parameters only, in declaration order
    pub fn inline_parameters(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.parameters.iter().filter_map(|entry| match entry {
            ParameterEntry::Inline { name, value } => Some((name.as_str(), value)),
            ParameterEntry::File(_) => None,
        })
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.inline_parameters()
            .find(|(param_name, _)| *param_name == name)
            .map(|(_, value)| value)
    }
}

/// Where the process's stdout/stderr goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Log,
    Screen,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Log => "log",
            OutputMode::Screen => "screen",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a node's ordered parameter list
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterEntry {
    Inline { name: String, value: ParameterValue },
    File(Vec<Substitution>),
}

impl ParameterEntry {
    pub fn inline(name: impl Into<String>, value: ParameterValue) -> Self {
        ParameterEntry::Inline {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Text(Vec<Substitution>),
    Integer(i64),
    Bool(bool),
}

impl ParameterValue {
    pub fn text(s: impl Into<String>) -> Self {
        ParameterValue::Text(vec![Substitution::Text(s.into())])
    }

    pub fn resolve(&self, context: &LaunchContext) -> Result<String, SubstitutionError> {
        match self {
            ParameterValue::Text(subs) => resolve_substitutions(subs, context),
            ParameterValue::Integer(value) => Ok(value.to_string()),
            ParameterValue::Bool(value) => Ok(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Remapping {
    pub from: Vec<Substitution>,
    pub to: Vec<Substitution>,
}

//! Declare argument action for argument metadata

use crate::substitution::Substitution;

/// Declare argument action with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareArgumentAction {
    pub name: String,
    pub default: Option<Vec<Substitution>>,
    pub description: Option<String>,
}

impl DeclareArgumentAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            description: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(vec![Substitution::Text(default.into())]);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Default rendered for display, `None` when the argument is required
    pub fn default_text(&self) -> Option<String> {
        self.default.as_ref().map(|subs| {
            subs.iter()
                .map(|sub| match sub {
                    Substitution::Text(text) => text.clone(),
                    Substitution::LaunchConfiguration(name) => format!("$(var {})", name),
                    other => format!("{:?}", other),
                })
                .collect()
        })
    }
}

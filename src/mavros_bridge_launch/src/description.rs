//! Launch description: the ordered entity list handed to the resolver

use crate::actions::{DeclareArgumentAction, NodeAction};

#[derive(Debug, Clone, PartialEq)]
pub enum LaunchEntity {
    DeclareArgument(DeclareArgumentAction),
    Node(NodeAction),
}

impl From<DeclareArgumentAction> for LaunchEntity {
    fn from(action: DeclareArgumentAction) -> Self {
        LaunchEntity::DeclareArgument(action)
    }
}

impl From<NodeAction> for LaunchEntity {
    fn from(action: NodeAction) -> Self {
        LaunchEntity::Node(action)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchDescription {
    entities: Vec<LaunchEntity>,
}

impl LaunchDescription {
    pub fn new(entities: Vec<LaunchEntity>) -> Self {
        Self { entities }
    }

    pub fn add(&mut self, entity: impl Into<LaunchEntity>) {
        self.entities.push(entity.into());
    }

    pub fn entities(&self) -> &[LaunchEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn declared_arguments(&self) -> impl Iterator<Item = &DeclareArgumentAction> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::DeclareArgument(arg) => Some(arg),
            LaunchEntity::Node(_) => None,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeAction> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::Node(node) => Some(node),
            LaunchEntity::DeclareArgument(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description() {
        let description = LaunchDescription::default();
        assert!(description.is_empty());
        assert_eq!(description.declared_arguments().count(), 0);
        assert_eq!(description.nodes().count(), 0);
    }

    #[test]
    fn test_entities_keep_insertion_order() {
        let mut description = LaunchDescription::default();
        description.add(NodeAction::new("demo", "talker"));
        description.add(DeclareArgumentAction::new("rate").with_default("10"));
        description.add(NodeAction::new("demo", "listener"));

        assert_eq!(description.len(), 3);
        assert!(matches!(description.entities()[0], LaunchEntity::Node(_)));
        assert!(matches!(
            description.entities()[1],
            LaunchEntity::DeclareArgument(_)
        ));
        assert_eq!(description.nodes().count(), 2);
        assert_eq!(
            description.declared_arguments().next().map(|a| a.name.as_str()),
            Some("rate")
        );
    }
}

//! Static transform publisher nodes

use crate::actions::{NodeAction, OutputMode};
use crate::bridge::frames::FrameName;
use crate::substitution::Substitution;

pub const TF2_ROS_PACKAGE: &str = "tf2_ros";
pub const STATIC_TRANSFORM_PUBLISHER: &str = "static_transform_publisher";

/// Fixed transform between two frames.
///
/// Rotation is yaw, pitch, roll in radians, matching the positional argument
/// order of `static_transform_publisher`.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticTransform {
    pub translation: [Vec<Substitution>; 3],
    pub rotation: [Vec<Substitution>; 3],
    pub frame_id: FrameName,
    pub child_frame_id: FrameName,
}

impl StaticTransform {
    pub fn identity(frame_id: FrameName, child_frame_id: FrameName) -> Self {
        Self {
            translation: zeros(),
            rotation: zeros(),
            frame_id,
            child_frame_id,
        }
    }

    pub fn with_translation(
        mut self,
        x: Vec<Substitution>,
        y: Vec<Substitution>,
        z: Vec<Substitution>,
    ) -> Self {
        self.translation = [x, y, z];
        self
    }

    /// `x y z yaw pitch roll frame_id child_frame_id`
    pub fn to_arguments(&self) -> Vec<Vec<Substitution>> {
        self.translation
            .iter()
            .chain(self.rotation.iter())
            .cloned()
            .chain([self.frame_id.clone(), self.child_frame_id.clone()])
            .collect()
    }

    pub fn into_node(self) -> NodeAction {
        NodeAction::new(TF2_ROS_PACKAGE, STATIC_TRANSFORM_PUBLISHER)
            .with_output(OutputMode::Log)
            .with_arguments(self.to_arguments())
    }
}

fn zeros() -> [Vec<Substitution>; 3] {
    [
        vec![Substitution::text("0")],
        vec![Substitution::text("0")],
        vec![Substitution::text("0")],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::frames::fixed_frame;
    use crate::substitution::{resolve_substitutions, LaunchContext};

    fn resolve_all(args: &[Vec<Substitution>], context: &LaunchContext) -> Vec<String> {
        args.iter()
            .map(|arg| resolve_substitutions(arg, context).unwrap())
            .collect()
    }

    #[test]
    fn test_identity_arguments() {
        let tf = StaticTransform::identity(fixed_frame("base_link"), fixed_frame("camera"));
        let context = LaunchContext::with_prefixes(vec![]);
        assert_eq!(
            resolve_all(&tf.to_arguments(), &context),
            vec!["0", "0", "0", "0", "0", "0", "base_link", "camera"]
        );
    }

    #[test]
    fn test_translation_from_configuration() {
        let tf = StaticTransform::identity(fixed_frame("world"), fixed_frame("map"))
            .with_translation(
                vec![Substitution::configuration("init_x")],
                vec![Substitution::configuration("init_y")],
                vec![Substitution::text("0")],
            );

        let mut context = LaunchContext::with_prefixes(vec![]);
        context.set_configuration("init_x".to_string(), "1.5".to_string());
        context.set_configuration("init_y".to_string(), "-2.0".to_string());

        assert_eq!(
            resolve_all(&tf.to_arguments(), &context),
            vec!["1.5", "-2.0", "0", "0", "0", "0", "world", "map"]
        );
    }

    #[test]
    fn test_into_node() {
        let node =
            StaticTransform::identity(fixed_frame("a"), fixed_frame("b")).into_node();
        assert_eq!(node.package, vec![Substitution::text("tf2_ros")]);
        assert_eq!(
            node.executable,
            vec![Substitution::text("static_transform_publisher")]
        );
        assert_eq!(node.output, OutputMode::Log);
        assert_eq!(node.arguments.len(), 8);
        assert!(node.parameters.is_empty());
        assert!(node.remappings.is_empty());
    }
}

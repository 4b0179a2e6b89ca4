//! Launch description for one simulated PX4 agent bridged through MAVROS
//!
//! Everything agent specific is derived from the `drone_id` argument:
//! per-agent frame names, the UDP port pair of the flight controller link,
//! the MAVLink system id and the namespaced odometry topic. The derived
//! values stay unresolved substitutions until the description is resolved.

pub mod frames;
pub mod layout;
pub mod mavros;
pub mod tf;

pub use frames::AgentFrames;
pub use layout::AgentLayout;
pub use mavros::{FcuEndpoint, FcuProtocol, MavrosConfig};
pub use tf::StaticTransform;

use crate::actions::DeclareArgumentAction;
use crate::description::LaunchDescription;
use crate::substitution::Substitution;

/// Package whose share directory holds the MAVROS config files
pub const PACKAGE_NAME: &str = "mavros_bridge";

pub const DRONE_ID_ARG: &str = "drone_id";
pub const INIT_X_ARG: &str = "init_x";
pub const INIT_Y_ARG: &str = "init_y";

pub fn declare_arguments() -> [DeclareArgumentAction; 3] {
    [
        DeclareArgumentAction::new(DRONE_ID_ARG)
            .with_default("0")
            .with_description("Agent id used to offset per-agent frame names and FCU ports"),
        DeclareArgumentAction::new(INIT_X_ARG)
            .with_default("0.0")
            .with_description("Initial x position of the agent in the world frame"),
        DeclareArgumentAction::new(INIT_Y_ARG)
            .with_default("0.0")
            .with_description("Initial y position of the agent in the world frame"),
    ]
}

/// Build the launch description: three argument declarations, the world to
/// map and base_link to camera static transforms, and the MAVROS node.
pub fn generate_launch_description() -> LaunchDescription {
    let frames = AgentFrames::for_launch();

    // SITL agents all spawn at the origin; the world offset is applied in TF
    let drone_origin_tf = StaticTransform::identity(frames.world.clone(), frames.map.clone())
        .with_translation(
            vec![Substitution::configuration(INIT_X_ARG)],
            vec![Substitution::configuration(INIT_Y_ARG)],
            vec![Substitution::text("0")],
        );

    let camera_link_tf = StaticTransform::identity(frames.base_link.clone(), frames.camera);

    let mavros = MavrosConfig::for_agent(frames.map, frames.base_link);

    let mut description = LaunchDescription::default();
    for argument in declare_arguments() {
        description.add(argument);
    }
    description.add(drone_origin_tf.into_node());
    description.add(camera_link_tf.into_node());
    description.add(mavros.into_node());

    log::debug!(
        "Composed launch description with {} entities",
        description.len()
    );
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::LaunchEntity;

    #[test]
    fn test_entity_order() {
        let description = generate_launch_description();
        let kinds: Vec<&str> = description
            .entities()
            .iter()
            .map(|entity| match entity {
                LaunchEntity::DeclareArgument(_) => "arg",
                LaunchEntity::Node(_) => "node",
            })
            .collect();
        assert_eq!(kinds, vec!["arg", "arg", "arg", "node", "node", "node"]);
    }

    #[test]
    fn test_declared_argument_defaults() {
        let description = generate_launch_description();
        let args: Vec<(String, Option<String>)> = description
            .declared_arguments()
            .map(|arg| (arg.name.clone(), arg.default_text()))
            .collect();
        assert_eq!(
            args,
            vec![
                ("drone_id".to_string(), Some("0".to_string())),
                ("init_x".to_string(), Some("0.0".to_string())),
                ("init_y".to_string(), Some("0.0".to_string())),
            ]
        );
    }

    #[test]
    fn test_composition_is_deterministic() {
        assert_eq!(generate_launch_description(), generate_launch_description());
    }

    #[test]
    fn test_origin_transform_uses_initial_position() {
        let description = generate_launch_description();
        let origin = description.nodes().next().unwrap();
        assert_eq!(
            origin.arguments[0],
            vec![Substitution::configuration("init_x")]
        );
        assert_eq!(
            origin.arguments[1],
            vec![Substitution::configuration("init_y")]
        );
        assert_eq!(origin.arguments[6], vec![Substitution::text("world")]);
        assert_eq!(origin.arguments[7], vec![Substitution::text("map")]);
    }
}

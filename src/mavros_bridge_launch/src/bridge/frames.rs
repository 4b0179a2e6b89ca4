//! Coordinate frame and topic naming for one agent
//!
//! Per-agent names are `d<drone_id><suffix>`. The map and base_link frames
//! stay shared across agents.

use crate::bridge::DRONE_ID_ARG;
use crate::substitution::Substitution;

/// A frame name, either fixed text or fragments joined at resolution time
pub type FrameName = Vec<Substitution>;

pub const WORLD_FRAME: &str = "world";
pub const MAP_FRAME: &str = "map";
pub const BASE_LINK_FRAME: &str = "base_link";

const LOCAL_MAP_SUFFIX: &str = "_lcl_map";
const CAMERA_LINK_SUFFIX: &str = "_camera_link";
const ODOM_SUFFIX: &str = "/odom";

/// Frames used by the launch description, with `drone_id` left unresolved
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFrames {
    pub world: FrameName,
    pub map: FrameName,
    pub local_map: FrameName,
    pub base_link: FrameName,
    pub camera: FrameName,
}

impl AgentFrames {
    pub fn for_launch() -> Self {
        Self {
            world: fixed_frame(WORLD_FRAME),
            map: fixed_frame(MAP_FRAME),
            local_map: agent_scoped("d", LOCAL_MAP_SUFFIX),
            base_link: fixed_frame(BASE_LINK_FRAME),
            camera: agent_scoped("d", CAMERA_LINK_SUFFIX),
        }
    }
}

pub fn fixed_frame(name: &str) -> FrameName {
    vec![Substitution::text(name)]
}

/// `<prefix><drone_id><suffix>` with the id read from the launch configuration
pub fn agent_scoped(prefix: &str, suffix: &str) -> Vec<Substitution> {
    vec![
        Substitution::text(prefix),
        Substitution::configuration(DRONE_ID_ARG),
        Substitution::text(suffix),
    ]
}

/// Topic the bridge's local odometry is remapped to
pub fn odom_topic() -> Vec<Substitution> {
    agent_scoped("/d", ODOM_SUFFIX)
}

pub fn agent_scoped_name(prefix: &str, drone_id: u16, suffix: &str) -> String {
    format!("{}{}{}", prefix, drone_id, suffix)
}

pub fn local_map_frame_name(drone_id: u16) -> String {
    agent_scoped_name("d", drone_id, LOCAL_MAP_SUFFIX)
}

pub fn camera_frame_name(drone_id: u16) -> String {
    agent_scoped_name("d", drone_id, CAMERA_LINK_SUFFIX)
}

pub fn odom_topic_name(drone_id: u16) -> String {
    agent_scoped_name("/d", drone_id, ODOM_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::{resolve_substitutions, LaunchContext};

    fn context_for(drone_id: &str) -> LaunchContext {
        let mut context = LaunchContext::with_prefixes(vec![]);
        context.set_configuration(DRONE_ID_ARG.to_string(), drone_id.to_string());
        context
    }

    #[test]
    fn test_agent_frame_names() {
        assert_eq!(local_map_frame_name(3), "d3_lcl_map");
        assert_eq!(camera_frame_name(3), "d3_camera_link");
        assert_eq!(odom_topic_name(3), "/d3/odom");
        assert_eq!(camera_frame_name(0), "d0_camera_link");
    }

    #[test]
    fn test_launch_frames_resolve_like_names() {
        let frames = AgentFrames::for_launch();
        let context = context_for("3");

        assert_eq!(resolve_substitutions(&frames.map, &context).unwrap(), "map");
        assert_eq!(
            resolve_substitutions(&frames.base_link, &context).unwrap(),
            "base_link"
        );
        assert_eq!(
            resolve_substitutions(&frames.local_map, &context).unwrap(),
            local_map_frame_name(3)
        );
        assert_eq!(
            resolve_substitutions(&frames.camera, &context).unwrap(),
            camera_frame_name(3)
        );
        assert_eq!(
            resolve_substitutions(&odom_topic(), &context).unwrap(),
            odom_topic_name(3)
        );
    }

    #[test]
    fn test_distinct_agents_never_share_frames() {
        let names: Vec<String> = (0..200u16).map(camera_frame_name).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());

        let maps: std::collections::HashSet<String> =
            (0..200u16).map(local_map_frame_name).collect();
        assert_eq!(maps.len(), 200);
    }

    #[test]
    fn test_shared_frames_ignore_drone_id() {
        let frames = AgentFrames::for_launch();
        for id in ["0", "1", "42"] {
            let context = context_for(id);
            assert_eq!(resolve_substitutions(&frames.map, &context).unwrap(), "map");
            assert_eq!(
                resolve_substitutions(&frames.world, &context).unwrap(),
                "world"
            );
        }
    }
}

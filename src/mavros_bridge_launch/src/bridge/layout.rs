//! Resolved names and ports for one agent

use crate::bridge::frames::{
    camera_frame_name, local_map_frame_name, odom_topic_name, BASE_LINK_FRAME, MAP_FRAME,
};
use crate::bridge::mavros::{target_system, FcuEndpoint, MAX_ROUTABLE_DRONE_ID};
use crate::bridge::DRONE_ID_ARG;
use crate::substitution::LaunchContext;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentLayout {
    pub drone_id: u16,
    pub map_frame: &'static str,
    pub local_map_frame: String,
    pub base_link_frame: &'static str,
    pub camera_frame: String,
    pub odom_topic: String,
    pub endpoint: FcuEndpoint,
    pub tgt_system: u32,
}

impl AgentLayout {
    pub fn new(drone_id: u16) -> Self {
        Self {
            drone_id,
            map_frame: MAP_FRAME,
            local_map_frame: local_map_frame_name(drone_id),
            base_link_frame: BASE_LINK_FRAME,
            camera_frame: camera_frame_name(drone_id),
            odom_topic: odom_topic_name(drone_id),
            endpoint: FcuEndpoint::for_drone(drone_id),
            tgt_system: target_system(drone_id),
        }
    }

    /// Layout of the agent selected in a resolved context, if its id is a
    /// plain non-negative integer
    pub fn from_context(context: &LaunchContext) -> Option<Self> {
        context
            .get_configuration(DRONE_ID_ARG)
            .and_then(|value| value.trim().parse::<u16>().ok())
            .map(Self::new)
    }
}

impl fmt::Display for AgentLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "drone_id:        {}", self.drone_id)?;
        writeln!(f, "map_frame:       {}", self.map_frame)?;
        writeln!(f, "local_map_frame: {}", self.local_map_frame)?;
        writeln!(f, "base_link_frame: {}", self.base_link_frame)?;
        writeln!(f, "camera_frame:    {}", self.camera_frame)?;
        writeln!(f, "odom_topic:      {}", self.odom_topic)?;
        writeln!(f, "fcu_addr:        {}", self.endpoint.addr)?;
        writeln!(f, "fcu_port:        {}", self.endpoint.port)?;
        writeln!(f, "fcu_url:         {}", self.endpoint)?;
        write!(f, "tgt_system:      {}", self.tgt_system)?;
        if !self.endpoint.is_routable() {
            write!(
                f,
                "\nwarning: fcu ports exceed 65535; drone_id must be at most {}",
                MAX_ROUTABLE_DRONE_ID
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_agent_three() {
        let layout = AgentLayout::new(3);
        assert_eq!(layout.local_map_frame, "d3_lcl_map");
        assert_eq!(layout.camera_frame, "d3_camera_link");
        assert_eq!(layout.odom_topic, "/d3/odom");
        assert_eq!(layout.endpoint.url(), "udp://:14543@localhost:14560");
        assert_eq!(layout.tgt_system, 4);
        assert_eq!(layout.map_frame, "map");
        assert_eq!(layout.base_link_frame, "base_link");
    }

    #[test]
    fn test_from_context() {
        let mut context = LaunchContext::with_prefixes(vec![]);
        assert_eq!(AgentLayout::from_context(&context), None);

        context.set_configuration(DRONE_ID_ARG.to_string(), "2".to_string());
        assert_eq!(AgentLayout::from_context(&context), Some(AgentLayout::new(2)));

        context.set_configuration(DRONE_ID_ARG.to_string(), "-1".to_string());
        assert_eq!(AgentLayout::from_context(&context), None);
    }

    #[test]
    fn test_display() {
        let text = AgentLayout::new(0).to_string();
        assert!(text.contains("fcu_url:         udp://:14540@localhost:14557"));
        assert!(text.ends_with("tgt_system:      1"));
        assert!(!text.contains("warning"));
    }

    #[test]
    fn test_display_flags_unroutable_ports() {
        let text = AgentLayout::new(60000).to_string();
        assert!(text.contains("fcu_port:        74557"));
        assert!(text.ends_with("warning: fcu ports exceed 65535; drone_id must be at most 50978"));

        let last = AgentLayout::new(MAX_ROUTABLE_DRONE_ID).to_string();
        assert!(!last.contains("warning"));
    }
}

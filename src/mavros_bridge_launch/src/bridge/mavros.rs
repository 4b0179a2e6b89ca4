//! MAVROS bridge node configuration

use crate::actions::{NodeAction, OutputMode, ParameterEntry, ParameterValue};
use crate::bridge::frames::{odom_topic, FrameName};
use crate::bridge::{DRONE_ID_ARG, PACKAGE_NAME};
use crate::substitution::Substitution;
use std::fmt;

pub const MAVROS_PACKAGE: &str = "mavros";
pub const MAVROS_EXECUTABLE: &str = "mavros_node";
pub const MAVROS_NAMESPACE: &str = "mavros";
pub const LOCAL_ODOM_TOPIC: &str = "local_position/odom";

pub const FCU_ADDR_BASE: u32 = 14540;
/// PX4 SITL offboard port; hardware setups use 14580
pub const FCU_PORT_BASE: u32 = 14557;
pub const TGT_SYSTEM_BASE: u32 = 1;
/// Largest id whose FCU ports both fit in a UDP port number
pub const MAX_ROUTABLE_DRONE_ID: u16 = (u16::MAX as u32 - FCU_PORT_BASE) as u16;
pub const TGT_COMPONENT: u8 = 1;

pub const PLUGINLISTS_FILE: &str = "px4_pluginlists.yaml";
pub const CONFIG_FILE: &str = "px4_config.yaml";

/// UDP link between the bridge and one flight controller instance
///
/// Ports are kept as `u32` so the mapping stays total and injective over
/// every `u16` id. Ids above [`MAX_ROUTABLE_DRONE_ID`] yield ports past
/// 65535; [`FcuEndpoint::is_routable`] reports that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FcuEndpoint {
    pub addr: u32,
    pub port: u32,
}

impl FcuEndpoint {
    pub fn for_drone(drone_id: u16) -> Self {
        Self {
            addr: FCU_ADDR_BASE + u32::from(drone_id),
            port: FCU_PORT_BASE + u32::from(drone_id),
        }
    }

    /// Whether both ports are valid UDP port numbers
    pub fn is_routable(&self) -> bool {
        self.addr <= u32::from(u16::MAX) && self.port <= u32::from(u16::MAX)
    }

    pub fn url(&self) -> String {
        format!("udp://:{}@localhost:{}", self.addr, self.port)
    }
}

impl fmt::Display for FcuEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

pub fn target_system(drone_id: u16) -> u32 {
    TGT_SYSTEM_BASE + u32::from(drone_id)
}

/// `<base> + drone_id`, evaluated when the launch is resolved
fn offset_expression(base: u32) -> Substitution {
    Substitution::PythonExpression(vec![
        Substitution::Text(format!("{} +", base)),
        Substitution::configuration(DRONE_ID_ARG),
    ])
}

/// `udp://:<14540 + id>@localhost:<14557 + id>`
pub fn fcu_url() -> Vec<Substitution> {
    vec![
        Substitution::text("udp://:"),
        offset_expression(FCU_ADDR_BASE),
        Substitution::text("@localhost:"),
        offset_expression(FCU_PORT_BASE),
    ]
}

/// `<share of mavros_bridge>/config/<file_name>`
pub fn config_file(file_name: &str) -> Vec<Substitution> {
    vec![Substitution::PathJoin(vec![
        vec![Substitution::FindPackageShare(PACKAGE_NAME.to_string())],
        vec![Substitution::text("config")],
        vec![Substitution::text(file_name)],
    ])]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FcuProtocol {
    V1,
    #[default]
    V2,
}

impl FcuProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            FcuProtocol::V1 => "v1.0",
            FcuProtocol::V2 => "v2.0",
        }
    }
}

/// Frames used by the local_position plugin and its TF broadcast
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPositionConfig {
    pub frame_id: FrameName,
    pub tf_send: bool,
    pub tf_frame_id: FrameName,
    pub tf_child_frame_id: FrameName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MavrosConfig {
    pub fcu_url: Vec<Substitution>,
    pub gcs_url: String,
    pub tgt_system: Vec<Substitution>,
    pub tgt_component: u8,
    pub fcu_protocol: FcuProtocol,
    pub plugin_lists: Vec<Substitution>,
    pub config: Vec<Substitution>,
    pub local_position: LocalPositionConfig,
}

impl MavrosConfig {
    /// Configuration for the agent selected by the `drone_id` argument
    pub fn for_agent(map_frame: FrameName, base_link_frame: FrameName) -> Self {
        Self {
            fcu_url: fcu_url(),
            gcs_url: String::new(),
            tgt_system: vec![offset_expression(TGT_SYSTEM_BASE)],
            tgt_component: TGT_COMPONENT,
            fcu_protocol: FcuProtocol::V2,
            plugin_lists: config_file(PLUGINLISTS_FILE),
            config: config_file(CONFIG_FILE),
            local_position: LocalPositionConfig {
                frame_id: map_frame.clone(),
                tf_send: true,
                tf_frame_id: map_frame,
                tf_child_frame_id: base_link_frame,
            },
        }
    }

    /// Ordered parameter list; files come after the connection parameters so
    /// the frame overrides below them win.
    pub fn to_parameters(&self) -> Vec<ParameterEntry> {
        let local_position = &self.local_position;
        vec![
            ParameterEntry::inline("fcu_url", ParameterValue::Text(self.fcu_url.clone())),
            ParameterEntry::inline("gcs_url", ParameterValue::text(self.gcs_url.clone())),
            ParameterEntry::inline(
                "tgt_system",
                ParameterValue::Text(self.tgt_system.clone()),
            ),
            ParameterEntry::inline(
                "tgt_component",
                ParameterValue::Integer(i64::from(self.tgt_component)),
            ),
            ParameterEntry::inline(
                "fcu_protocol",
                ParameterValue::text(self.fcu_protocol.as_str()),
            ),
            ParameterEntry::File(self.plugin_lists.clone()),
            ParameterEntry::File(self.config.clone()),
            ParameterEntry::inline(
                "local_position.frame_id",
                ParameterValue::Text(local_position.frame_id.clone()),
            ),
            ParameterEntry::inline(
                "local_position.tf.send",
                ParameterValue::Bool(local_position.tf_send),
            ),
            ParameterEntry::inline(
                "local_position.tf.frame_id",
                ParameterValue::Text(local_position.tf_frame_id.clone()),
            ),
            ParameterEntry::inline(
                "local_position.tf.child_frame_id",
                ParameterValue::Text(local_position.tf_child_frame_id.clone()),
            ),
        ]
    }

    pub fn into_node(self) -> NodeAction {
        NodeAction::new(MAVROS_PACKAGE, MAVROS_EXECUTABLE)
            .with_output(OutputMode::Screen)
            .with_namespace(MAVROS_NAMESPACE)
            .with_parameters(self.to_parameters())
            .with_remapping(LOCAL_ODOM_TOPIC, odom_topic())
    }
}

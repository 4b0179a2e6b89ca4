//! Action module

pub mod declare_argument;
pub mod node;

pub use declare_argument::DeclareArgumentAction;
pub use node::{NodeAction, OutputMode, ParameterEntry, ParameterValue, Remapping};

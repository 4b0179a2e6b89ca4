//! Substitution module

pub mod context;
mod eval;
pub mod types;

pub use context::{absolute_namespace, LaunchContext};
pub use types::{resolve_substitutions, Substitution};

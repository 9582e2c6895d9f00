//! Scripted incident events
//!
//! - `types`: the closed event vocabulary and its schedule wrapper
//! - `apply`: per-kind state mutation and timeline action descriptions

pub mod apply;
pub mod types;

pub use apply::EventError;
pub use types::{IncidentEvent, RoleDetails, ScheduledEvent};

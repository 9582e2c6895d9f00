//! Domain types for the incident replay
//!
//! - `state`: the single mutable record threaded through every tick
//! - `metrics`: the per-tick append-only metrics row

pub mod metrics;
pub mod state;

pub use metrics::MetricsRow;
pub use state::SimulationState;

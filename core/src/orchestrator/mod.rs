//! Orchestrator - the deterministic tick loop
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

pub use engine::{Engine, RunOutput, RunSummary, SimulationError, TickResult};

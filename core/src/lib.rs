//! Incident Replay Core - Deterministic Simulation Engine
//!
//! Replays a scripted cloud-incident scenario as a discrete-time
//! simulation and certifies the replay's output against frozen artifacts.
//!
//! # Architecture
//!
//! - **config**: scenario document parsing (name, horizon, parameters,
//!   regions, scripted events)
//! - **models**: simulation state and per-tick metrics rows
//! - **events**: the closed incident-event vocabulary and its application
//! - **request / observer / automation**: the three per-tick evaluation
//!   steps, in that fixed order
//! - **orchestrator**: the engine driving the tick loop
//! - **artifacts**: canonical byte encodings, freeze, and digest
//!   verification
//!
//! # Critical Invariants
//!
//! 1. No randomness, wall clock, or concurrency anywhere: the same
//!    configuration always yields byte-identical artifacts
//! 2. The engine exclusively owns the one mutable state record per run
//! 3. Inconsistent scenario scripts abort the run before any artifact is
//!    written

// Module declarations
pub mod artifacts;
pub mod automation;
pub mod config;
pub mod events;
pub mod models;
pub mod observer;
pub mod orchestrator;
pub mod request;

// Re-exports for convenience
pub use artifacts::{
    codec::{encode_metrics, encode_timeline, sha256_hex},
    store::{ArtifactError, ArtifactStore, METRICS_ARTIFACT, TIMELINE_ARTIFACT},
};
pub use config::{ActorsSection, ConfigError, Params, ScenarioConfig, ScenarioSection};
pub use events::{EventError, IncidentEvent, RoleDetails, ScheduledEvent};
pub use models::{MetricsRow, SimulationState};
pub use observer::HealthColor;
pub use orchestrator::{Engine, RunOutput, RunSummary, SimulationError, TickResult};
pub use request::RequestOutcome;

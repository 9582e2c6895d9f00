//! Scenario configuration
//!
//! The scenario document is JSON:
//!
//! ```json
//! {
//!   "scenario": { "name": "iam-propagation-lag", "max_tick": 10 },
//!   "parameters": {
//!     "propagation_lag_ticks": 3,
//!     "observer_cache_ttl_ticks": 2,
//!     "automation_trigger_after_ticks": 2
//!   },
//!   "actors": { "regions": ["us-east"] },
//!   "incident_events": [
//!     { "tick": 0, "event": "deploy_service_account" }
//!   ]
//! }
//! ```
//!
//! Missing or malformed fields are fatal at load time, before any
//! simulation tick runs.

use crate::events::types::ScheduledEvent;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors loading the scenario document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scenario config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunable simulation parameters, immutable for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Ticks before a role attachment is enforced everywhere
    pub propagation_lag_ticks: usize,

    /// Ticks a RED observation stays cached after being set
    pub observer_cache_ttl_ticks: usize,

    /// Consecutive RED observations before automation revokes (must be >= 1)
    pub automation_trigger_after_ticks: usize,
}

/// Scenario identity and horizon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSection {
    /// Human-readable scenario name, echoed in the summary
    pub name: String,

    /// Last tick of the run (inclusive; the run covers 0..=max_tick)
    pub max_tick: usize,
}

/// Named external dependencies of the simulated service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorsSection {
    /// Regions the service depends on, in evaluation order
    pub regions: Vec<String>,
}

/// Complete scenario configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioSection,
    pub parameters: Params,
    pub actors: ActorsSection,
    pub incident_events: Vec<ScheduledEvent>,
}

impl ScenarioConfig {
    /// Load and parse a scenario document from disk
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

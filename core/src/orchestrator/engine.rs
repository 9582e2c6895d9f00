//! Engine - deterministic incident replay loop
//!
//! Advances the simulation state tick by tick, in fixed order per tick:
//!
//! ```text
//! For each tick t in 0..=max_tick:
//! 1. Apply the tick's scripted events, in listed order
//! 2. Evaluate the service request, update counters
//! 3. Compute the observer color (cache-lagged)
//! 4. Run the automation step (streak + possible revocation)
//! 5. Append one metrics row and the tick's timeline lines
//! ```
//!
//! There is no randomness and no wall-clock dependency anywhere in the
//! loop: the same configuration always produces byte-identical timeline
//! and metrics artifacts. That property is what the frozen-artifact
//! verifier certifies.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = ScenarioConfig::from_path(Path::new("scenario.json"))?;
//! let output = Engine::new(config)?.run()?;
//! println!("{} timeline lines", output.timeline_lines.len());
//! ```

use crate::automation::automation_step;
use crate::config::{Params, ScenarioConfig};
use crate::events::apply::EventError;
use crate::events::types::IncidentEvent;
use crate::models::metrics::MetricsRow;
use crate::models::state::SimulationState;
use crate::observer::{observe, HealthColor};
use crate::request::{evaluate_request, RequestOutcome};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Simulation error types
///
/// Every variant is fatal: the run aborts and no artifact is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Internally inconsistent scenario script
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Result of a single tick
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Tick number that was executed
    pub tick: usize,

    /// Number of scripted events applied this tick
    pub events_applied: usize,

    /// Outcome of the tick's service request
    pub request: RequestOutcome,

    /// Health color the observer reported
    pub observed: HealthColor,

    /// Whether automation revoked the service account this tick
    pub automation_fired: bool,
}

/// Full output of a completed run
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Timeline lines in strict tick-ascending, within-tick-insertion order
    pub timeline_lines: Vec<String>,

    /// One metrics row per tick, in tick order
    pub metrics_rows: Vec<MetricsRow>,

    /// Compact human-readable summary of the run
    pub summary: RunSummary,
}

/// Summary record assembled after the last tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scenario_name: String,
    pub max_tick: usize,
    pub required_role: String,
    pub role_attached_tick: Option<usize>,
    pub operator_assumption_tick: Option<usize>,
    pub automation_action_tick: Option<usize>,
    pub total_requests: u64,
    pub denied_requests: u64,
    pub revoked_requests: u64,
    pub propagation_lag_ticks: usize,
    pub observer_cache_ttl_ticks: usize,
    pub automation_trigger_after_ticks: usize,
}

/// Deterministic replay engine
///
/// Owns the single [`SimulationState`] instance for the run; no other
/// component reads or writes it while the run is in progress.
#[derive(Debug)]
pub struct Engine {
    /// Simulation state, exclusively owned
    state: SimulationState,

    /// Immutable run parameters
    params: Params,

    /// Region dependencies, in evaluation order
    regions: Vec<String>,

    /// Scenario name, echoed in the summary
    scenario_name: String,

    /// Last tick of the run (inclusive)
    max_tick: usize,

    /// Scripted events grouped by tick, within-tick order preserved
    events_by_tick: BTreeMap<usize, Vec<IncidentEvent>>,

    /// Accumulated timeline lines
    timeline: Vec<String>,

    /// Accumulated metrics rows
    metrics: Vec<MetricsRow>,
}

impl Engine {
    /// Create a new engine from a parsed scenario configuration
    ///
    /// Fails if the configuration is structurally valid JSON but
    /// semantically unusable (zero automation threshold).
    pub fn new(config: ScenarioConfig) -> Result<Self, SimulationError> {
        if config.parameters.automation_trigger_after_ticks == 0 {
            return Err(SimulationError::InvalidConfig(
                "automation_trigger_after_ticks must be >= 1".to_string(),
            ));
        }

        let mut events_by_tick: BTreeMap<usize, Vec<IncidentEvent>> = BTreeMap::new();
        for scheduled in config.incident_events {
            events_by_tick
                .entry(scheduled.tick)
                .or_default()
                .push(scheduled.event);
        }

        Ok(Self {
            state: SimulationState::new(),
            params: config.parameters,
            regions: config.actors.regions,
            scenario_name: config.scenario.name,
            max_tick: config.scenario.max_tick,
            events_by_tick,
            timeline: Vec::new(),
            metrics: Vec::new(),
        })
    }

    /// Tick the engine will execute next
    pub fn current_tick(&self) -> usize {
        self.state.tick
    }

    /// Read access to the simulation state (tests and summaries)
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Execute one simulation tick and advance time
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let tick = self.state.tick;

        // STEP 1: scripted events, in listed order
        let mut events_applied = 0;
        if let Some(events) = self.events_by_tick.get(&tick) {
            for event in events {
                let action = event.apply(&mut self.state)?;
                debug!(tick, %action, "applied incident event");
                self.timeline.push(format!("T{}: EVENT {}", tick, action));
                events_applied += 1;
            }
        }

        // STEP 2: the tick's service request
        let request = evaluate_request(&self.state, &self.params, &self.regions);
        self.state.total_requests += 1;
        match &request {
            RequestOutcome::PermissionDenied(_) => self.state.denied_requests += 1,
            RequestOutcome::ServiceAccountRevoked => self.state.revoked_requests += 1,
            _ => {}
        }
        self.timeline.push(format!("T{}: REQUEST {}", tick, request));

        // STEP 3: observer color. The OBSERVER line carries the streak as
        // it stands before this tick's automation step updates it.
        let observed = observe(&mut self.state, &self.params, request.is_success());
        self.timeline.push(format!(
            "T{}: OBSERVER {} consecutive_red={}",
            tick, observed, self.state.consecutive_observed_red
        ));

        // STEP 4: automation
        let action = automation_step(&mut self.state, &self.params, observed);
        let automation_fired = action.is_some();
        if let Some(action) = action {
            self.timeline
                .push(format!("T{}: DECISION WRONG {}", tick, action));
        }

        // STEP 5: metrics row, with the post-automation streak
        self.metrics.push(MetricsRow {
            tick,
            request_result: request.clone(),
            observer: observed,
            consecutive_observed_red: self.state.consecutive_observed_red,
            service_account_revoked: self.state.service_account_revoked,
            role_attached_tick: self.state.role_attached_tick,
        });

        debug!(tick, request = %request, observed = %observed, automation_fired, "tick complete");

        self.state.tick += 1;

        Ok(TickResult {
            tick,
            events_applied,
            request,
            observed,
            automation_fired,
        })
    }

    /// Drive the full run and assemble its output
    pub fn run(mut self) -> Result<RunOutput, SimulationError> {
        while self.state.tick <= self.max_tick {
            self.tick()?;
        }

        let summary = RunSummary {
            scenario_name: self.scenario_name,
            max_tick: self.max_tick,
            required_role: self.state.required_role,
            role_attached_tick: self.state.role_attached_tick,
            operator_assumption_tick: self.state.operator_assumption_tick,
            automation_action_tick: self.state.automation_action_tick,
            total_requests: self.state.total_requests,
            denied_requests: self.state.denied_requests,
            revoked_requests: self.state.revoked_requests,
            propagation_lag_ticks: self.params.propagation_lag_ticks,
            observer_cache_ttl_ticks: self.params.observer_cache_ttl_ticks,
            automation_trigger_after_ticks: self.params.automation_trigger_after_ticks,
        };

        Ok(RunOutput {
            timeline_lines: self.timeline,
            metrics_rows: self.metrics,
            summary,
        })
    }
}

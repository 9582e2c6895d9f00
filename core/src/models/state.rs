//! Simulation State
//!
//! The complete mutable state of one incident replay. A single instance is
//! constructed per run and owned exclusively by the engine; no other
//! component holds a reference across ticks.
//!
//! # Critical Invariants
//!
//! 1. **Monotone lifecycle booleans**: `service_account_deployed`,
//!    `service_account_in_use` and `service_account_revoked` each flip
//!    `false -> true` at most once and are never reset within a run.
//! 2. **Attachment is overwrite-only**: `role_attached_tick`, once set, is
//!    only ever replaced by a *later* attach event, never cleared.
//! 3. **Streak reflects observer output**: `consecutive_observed_red` is
//!    fully determined by the per-tick observer colors since tick 0.
//! 4. **Counters never decrease.**

/// Complete state of a running incident replay
///
/// # Example
///
/// ```rust
/// use incident_replay_core::SimulationState;
///
/// let state = SimulationState::new();
/// assert_eq!(state.tick, 0);
/// assert_eq!(state.required_role, "unknown");
/// assert!(!state.service_account_deployed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    /// Current discrete time step (starts at 0, advanced by the engine)
    pub tick: usize,

    /// Tick at which the required IAM role was attached (`None` until the
    /// attach event occurs; a later attach event overwrites it)
    pub role_attached_tick: Option<usize>,

    /// Role identifier from the most recent attach event
    pub required_role: String,

    /// Service account has been deployed
    pub service_account_deployed: bool,

    /// Service has started using the service account
    pub service_account_in_use: bool,

    /// Automation has revoked the service account (permanent for the run)
    pub service_account_revoked: bool,

    /// End of the observability cache window: the observer keeps reporting
    /// RED through this tick even if requests recover
    pub cached_red_until_tick: Option<usize>,

    /// Run length of consecutive RED observations
    pub consecutive_observed_red: usize,

    /// Tick at which the operator declared propagation complete (audit only)
    pub operator_assumption_tick: Option<usize>,

    /// Tick at which automation revoked the service account
    pub automation_action_tick: Option<usize>,

    /// Requests attempted so far (one per tick)
    pub total_requests: u64,

    /// Requests denied for lack of role propagation
    pub denied_requests: u64,

    /// Requests denied because the account was revoked
    pub revoked_requests: u64,
}

impl SimulationState {
    /// Create the initial state for a run
    pub fn new() -> Self {
        Self {
            tick: 0,
            role_attached_tick: None,
            required_role: "unknown".to_string(),
            service_account_deployed: false,
            service_account_in_use: false,
            service_account_revoked: false,
            cached_red_until_tick: None,
            consecutive_observed_red: 0,
            operator_assumption_tick: None,
            automation_action_tick: None,
            total_requests: 0,
            denied_requests: 0,
            revoked_requests: 0,
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

//! Service request evaluation
//!
//! One simulated request is made per tick. The decision is a fixed-order
//! policy: first applicable reason wins.
//!
//! 1. Service account not yet in use -> `SERVICE_NOT_STARTED`
//! 2. Service account revoked -> `SERVICE_ACCOUNT_REVOKED`
//! 3. Role enforcement not yet propagated -> `PERMISSION_DENIED(<region>)`
//!    for the first region in the configured order
//! 4. Otherwise -> `OK`
//!
//! Propagation lag is a single shared policy across all regions, not a
//! per-region independent delay; the region named in the denial is simply
//! the first one listed.

use crate::config::Params;
use crate::models::state::SimulationState;
use std::fmt;

/// Outcome of one per-tick service request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Request succeeded
    Ok,
    /// Service account not yet in use (pre-start)
    ServiceNotStarted,
    /// Service account revoked by automation
    ServiceAccountRevoked,
    /// Role enforcement has not propagated; carries the denying region
    PermissionDenied(String),
}

impl RequestOutcome {
    /// Whether the request succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Ok)
    }
}

impl fmt::Display for RequestOutcome {
    /// Canonical reason codes as they appear in timeline and metrics
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOutcome::Ok => write!(f, "OK"),
            RequestOutcome::ServiceNotStarted => write!(f, "SERVICE_NOT_STARTED"),
            RequestOutcome::ServiceAccountRevoked => write!(f, "SERVICE_ACCOUNT_REVOKED"),
            RequestOutcome::PermissionDenied(region) => {
                write!(f, "PERMISSION_DENIED({})", region)
            }
        }
    }
}

/// True once role enforcement has propagated by `tick`
///
/// False while no role has ever been attached.
fn role_enforced(tick: usize, role_attached_tick: Option<usize>, lag_ticks: usize) -> bool {
    match role_attached_tick {
        Some(attached) => tick >= attached + lag_ticks,
        None => false,
    }
}

/// Evaluate the tick's service request
pub fn evaluate_request(
    state: &SimulationState,
    params: &Params,
    regions: &[String],
) -> RequestOutcome {
    if !state.service_account_in_use {
        return RequestOutcome::ServiceNotStarted;
    }
    if state.service_account_revoked {
        return RequestOutcome::ServiceAccountRevoked;
    }

    // Enforcement lag is shared; the first listed region is the one a
    // denial reports.
    for region in regions {
        if !role_enforced(
            state.tick,
            state.role_attached_tick,
            params.propagation_lag_ticks,
        ) {
            return RequestOutcome::PermissionDenied(region.clone());
        }
    }

    RequestOutcome::Ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lag: usize) -> Params {
        Params {
            propagation_lag_ticks: lag,
            observer_cache_ttl_ticks: 0,
            automation_trigger_after_ticks: 1,
        }
    }

    fn running_state() -> SimulationState {
        let mut state = SimulationState::new();
        state.service_account_deployed = true;
        state.service_account_in_use = true;
        state
    }

    #[test]
    fn test_role_enforced_boundaries() {
        assert!(!role_enforced(100, None, 0));

        assert!(!role_enforced(4, Some(2), 3));
        assert!(role_enforced(5, Some(2), 3));
        assert!(role_enforced(6, Some(2), 3));

        // Zero lag enforces immediately
        assert!(role_enforced(2, Some(2), 0));
    }

    #[test]
    fn test_not_started_wins_first() {
        let mut state = SimulationState::new();
        // Even a revoked, role-attached account reports pre-start first
        state.service_account_revoked = true;
        state.role_attached_tick = Some(0);

        let outcome = evaluate_request(&state, &params(0), &["eu-west".to_string()]);
        assert_eq!(outcome, RequestOutcome::ServiceNotStarted);
    }

    #[test]
    fn test_revoked_wins_over_permission() {
        let mut state = running_state();
        state.service_account_revoked = true;

        let outcome = evaluate_request(&state, &params(5), &["eu-west".to_string()]);
        assert_eq!(outcome, RequestOutcome::ServiceAccountRevoked);
    }

    #[test]
    fn test_permission_denied_names_first_region() {
        let mut state = running_state();
        state.tick = 1;
        state.role_attached_tick = Some(0);

        let regions = vec!["us-east".to_string(), "eu-west".to_string()];
        let outcome = evaluate_request(&state, &params(3), &regions);
        assert_eq!(outcome, RequestOutcome::PermissionDenied("us-east".to_string()));
    }

    #[test]
    fn test_denied_until_lag_elapses() {
        let mut state = running_state();
        state.role_attached_tick = Some(0);
        let regions = vec!["us-east".to_string()];
        let p = params(3);

        for tick in 0..3 {
            state.tick = tick;
            assert!(
                !evaluate_request(&state, &p, &regions).is_success(),
                "tick {} should be denied",
                tick
            );
        }
        state.tick = 3;
        assert_eq!(evaluate_request(&state, &p, &regions), RequestOutcome::Ok);
    }

    #[test]
    fn test_no_regions_means_no_permission_check() {
        // No configured region dependencies: nothing left to deny on.
        let state = running_state();
        let outcome = evaluate_request(&state, &params(10), &[]);
        assert_eq!(outcome, RequestOutcome::Ok);
    }

    #[test]
    fn test_reason_code_rendering() {
        assert_eq!(RequestOutcome::Ok.to_string(), "OK");
        assert_eq!(
            RequestOutcome::ServiceNotStarted.to_string(),
            "SERVICE_NOT_STARTED"
        );
        assert_eq!(
            RequestOutcome::ServiceAccountRevoked.to_string(),
            "SERVICE_ACCOUNT_REVOKED"
        );
        assert_eq!(
            RequestOutcome::PermissionDenied("us-east".to_string()).to_string(),
            "PERMISSION_DENIED(us-east)"
        );
    }
}

//! Automated remediation step
//!
//! Tracks the consecutive-RED streak and, when it reaches the configured
//! threshold, revokes the service account. This is the scenario's central
//! wrong decision: the automation misclassifies propagation/caching lag as
//! a compromise. Revocation happens at most once per run; once revoked the
//! guard is side-effect-free.

use crate::config::Params;
use crate::models::state::SimulationState;
use crate::observer::HealthColor;
use tracing::warn;

/// Action string recorded on the timeline when the misfire happens
pub const REVOKE_ACTION: &str =
    "AUTOMATION_REVOKE_SERVICE_ACCOUNT (misclassified propagation lag as compromise/misconfig)";

/// Update the RED streak and fire remediation if the threshold is reached
///
/// Returns the wrong-decision action string on the tick revocation fires,
/// `None` otherwise.
pub fn automation_step(
    state: &mut SimulationState,
    params: &Params,
    observed: HealthColor,
) -> Option<&'static str> {
    match observed {
        HealthColor::Red => state.consecutive_observed_red += 1,
        HealthColor::Green => state.consecutive_observed_red = 0,
    }

    if !state.service_account_revoked
        && state.consecutive_observed_red >= params.automation_trigger_after_ticks
    {
        state.service_account_revoked = true;
        state.automation_action_tick = Some(state.tick);
        warn!(
            tick = state.tick,
            streak = state.consecutive_observed_red,
            "automation revoked the service account"
        );
        return Some(REVOKE_ACTION);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(threshold: usize) -> Params {
        Params {
            propagation_lag_ticks: 0,
            observer_cache_ttl_ticks: 0,
            automation_trigger_after_ticks: threshold,
        }
    }

    #[test]
    fn test_red_increments_green_resets() {
        let mut state = SimulationState::new();
        let p = params(100);

        automation_step(&mut state, &p, HealthColor::Red);
        automation_step(&mut state, &p, HealthColor::Red);
        assert_eq!(state.consecutive_observed_red, 2);

        automation_step(&mut state, &p, HealthColor::Green);
        assert_eq!(state.consecutive_observed_red, 0);
    }

    #[test]
    fn test_fires_exactly_at_threshold() {
        let mut state = SimulationState::new();
        let p = params(3);

        state.tick = 0;
        assert_eq!(automation_step(&mut state, &p, HealthColor::Red), None);
        state.tick = 1;
        assert_eq!(automation_step(&mut state, &p, HealthColor::Red), None);
        assert!(!state.service_account_revoked);

        state.tick = 2;
        let action = automation_step(&mut state, &p, HealthColor::Red);
        assert_eq!(action, Some(REVOKE_ACTION));
        assert!(state.service_account_revoked);
        assert_eq!(state.automation_action_tick, Some(2));
    }

    #[test]
    fn test_fires_at_most_once() {
        let mut state = SimulationState::new();
        let p = params(1);

        state.tick = 0;
        assert!(automation_step(&mut state, &p, HealthColor::Red).is_some());

        // Qualifying streaks after revocation are silently ignored.
        for tick in 1..10 {
            state.tick = tick;
            assert_eq!(automation_step(&mut state, &p, HealthColor::Red), None);
        }
        assert_eq!(state.automation_action_tick, Some(0));
    }

    #[test]
    fn test_streak_keeps_counting_after_revocation() {
        let mut state = SimulationState::new();
        let p = params(2);

        for tick in 0..5 {
            state.tick = tick;
            automation_step(&mut state, &p, HealthColor::Red);
        }
        assert_eq!(state.consecutive_observed_red, 5);
    }

    proptest! {
        /// The streak equals the length of the trailing RED run of the
        /// observed color sequence, regardless of anything else.
        #[test]
        fn prop_streak_is_trailing_red_run(colors in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut state = SimulationState::new();
            let p = params(usize::MAX); // never fires
            for (tick, &red) in colors.iter().enumerate() {
                state.tick = tick;
                let color = if red { HealthColor::Red } else { HealthColor::Green };
                automation_step(&mut state, &p, color);
            }

            let trailing = colors.iter().rev().take_while(|&&red| red).count();
            prop_assert_eq!(state.consecutive_observed_red, trailing);
        }
    }
}

//! Event application
//!
//! Applies a single scripted event to the simulation state and returns the
//! human-readable action description recorded on the timeline. Scenario
//! scripts that contradict themselves (service starts before the account
//! exists, kinds outside the vocabulary) fail hard rather than being
//! silently patched over.

use crate::events::types::IncidentEvent;
use crate::models::state::SimulationState;
use thiserror::Error;

/// Fatal event-application errors
///
/// Both variants mean the scenario script is internally inconsistent; the
/// run aborts and no artifact is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// `service_starts_using_service_account` before `deploy_service_account`
    #[error("service started using the service account before it was deployed (tick {tick})")]
    ServiceAccountNotDeployed { tick: usize },

    /// Event kind outside the closed vocabulary
    #[error("unknown event kind at tick {tick}")]
    UnknownEvent { tick: usize },
}

impl IncidentEvent {
    /// Apply this event to the state at the state's current tick
    ///
    /// Returns the action description for the timeline's EVENT line.
    pub fn apply(&self, state: &mut SimulationState) -> Result<String, EventError> {
        match self {
            IncidentEvent::DeployServiceAccount => {
                state.service_account_deployed = true;
                Ok("deploy_service_account".to_string())
            }
            IncidentEvent::AttachRequiredRole { details } => {
                // Last attach wins: the control plane acknowledges anew.
                state.role_attached_tick = Some(state.tick);
                state.required_role = details.role.clone();
                Ok(format!(
                    "attach_required_role({}) control_plane_ack",
                    state.required_role
                ))
            }
            IncidentEvent::ServiceStartsUsingServiceAccount => {
                if !state.service_account_deployed {
                    return Err(EventError::ServiceAccountNotDeployed { tick: state.tick });
                }
                state.service_account_in_use = true;
                Ok("service_starts_using_service_account".to_string())
            }
            IncidentEvent::OperatorAssumesPropagationComplete => {
                state.operator_assumption_tick = Some(state.tick);
                Ok("operator_assumes_propagation_complete (control-plane view)".to_string())
            }
            IncidentEvent::Unknown => Err(EventError::UnknownEvent { tick: state.tick }),
        }
    }
}

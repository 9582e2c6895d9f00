//! Incident event types
//!
//! The event vocabulary is a fixed closed set of four kinds. Scenario
//! documents spell the kind in the `event` field; anything outside the set
//! deserializes to [`IncidentEvent::Unknown`], which is rejected with a
//! fatal error when applied (never silently skipped).
//!
//! Events are read-only inputs: they are parsed once per run and never
//! mutated.

use serde::{Deserialize, Serialize};

/// A scripted incident event
///
/// Serde representation is internally tagged on `event`, matching the
/// scenario document:
///
/// ```json
/// { "tick": 0, "event": "attach_required_role", "details": { "role": "X" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IncidentEvent {
    /// The service account is deployed. Idempotent if repeated.
    DeployServiceAccount,

    /// The control plane acknowledges attachment of the required role.
    ///
    /// A later attach overwrites an earlier one: only the last attachment
    /// in a run counts, modeling a fresh control-plane acknowledgment.
    AttachRequiredRole {
        #[serde(default)]
        details: RoleDetails,
    },

    /// The service begins using the service account.
    ///
    /// Fatal if the account was never deployed: the scenario script is
    /// internally inconsistent.
    ServiceStartsUsingServiceAccount,

    /// The operator declares propagation complete (their mental model, not
    /// ground truth). Audit marker only; no effect on request, observer or
    /// automation logic.
    OperatorAssumesPropagationComplete,

    /// Any kind outside the closed vocabulary. Applying it is fatal.
    #[serde(other)]
    Unknown,
}

/// Detail payload of an `attach_required_role` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDetails {
    /// Role identifier; placeholder when the document omits it
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "unknown_role".to_string()
}

impl Default for RoleDetails {
    fn default() -> Self {
        Self {
            role: default_role(),
        }
    }
}

/// An incident event paired with the tick it is scheduled for
///
/// Within a tick, events run in the order they appear in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub tick: usize,
    #[serde(flatten)]
    pub event: IncidentEvent,
}

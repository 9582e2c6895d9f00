//! Per-tick metrics rows
//!
//! One row is appended per tick, in tick order, and never revised
//! afterward. Rendering to the tabular artifact lives in
//! `crate::artifacts::codec`.

use crate::observer::HealthColor;
use crate::request::RequestOutcome;

/// One row of the metrics artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRow {
    /// Tick this row describes
    pub tick: usize,

    /// Outcome of the tick's service request
    pub request_result: RequestOutcome,

    /// Health color the observer reported
    pub observer: HealthColor,

    /// RED streak after this tick's automation step ran
    pub consecutive_observed_red: usize,

    /// Whether the service account was revoked as of this tick
    pub service_account_revoked: bool,

    /// Tick the required role was attached, if any yet
    pub role_attached_tick: Option<usize>,
}

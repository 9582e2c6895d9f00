//! Observer color computation
//!
//! Models the monitoring system's caching-induced lag: a failed request
//! arms a RED cache window of `observer_cache_ttl_ticks`, and successful
//! requests inside that window are still reported RED. This is the central
//! "lag masks recovery" mechanism -- a true recovery stays invisible to
//! automation until the window lapses.

use crate::config::Params;
use crate::models::state::SimulationState;
use std::fmt;

/// Externally observed health color for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthColor {
    Green,
    Red,
}

impl fmt::Display for HealthColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthColor::Green => write!(f, "GREEN"),
            HealthColor::Red => write!(f, "RED"),
        }
    }
}

/// Compute the tick's observed color and update the cache window
///
/// A failure (any reason) reports RED and re-arms the window to
/// `tick + ttl`, overwriting any earlier window. A success still reports
/// RED while `tick <= cached_red_until_tick`.
pub fn observe(state: &mut SimulationState, params: &Params, request_ok: bool) -> HealthColor {
    if !request_ok {
        state.cached_red_until_tick = Some(state.tick + params.observer_cache_ttl_ticks);
        return HealthColor::Red;
    }

    match state.cached_red_until_tick {
        Some(until) if state.tick <= until => HealthColor::Red,
        _ => HealthColor::Green,
    }
}

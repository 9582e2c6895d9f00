//! Frozen artifact contract
//!
//! - `codec`: canonical byte serialization of the timeline and metrics
//!   outputs, plus content digests
//! - `store`: freeze (persist) and verify (digest-compare) against the
//!   artifacts committed in the output directory

pub mod codec;
pub mod store;

pub use codec::{encode_metrics, encode_timeline, sha256_hex};
pub use store::{ArtifactError, ArtifactStore, METRICS_ARTIFACT, TIMELINE_ARTIFACT};

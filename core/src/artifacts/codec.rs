//! Canonical artifact serialization
//!
//! Both artifacts are byte-exact contracts: any change to the engine that
//! alters a single byte of either encoding is a detected regression. Keep
//! these encoders boring and stable.

use crate::models::metrics::MetricsRow;
use sha2::{Digest, Sha256};

/// Header row of the metrics artifact, matching [`MetricsRow`] field order
pub const METRICS_HEADER: &str =
    "tick,request_result,observer,consecutive_observed_red,service_account_revoked,role_attached_tick";

/// Encode the timeline artifact
///
/// One line per trace entry, newline-terminated, UTF-8, trailing newline.
pub fn encode_timeline(lines: &[String]) -> Vec<u8> {
    let mut text = lines.join("\n");
    text.push('\n');
    text.into_bytes()
}

/// Encode the metrics artifact as CSV
///
/// Header row first, then one data row per tick in ascending order. The
/// revocation flag is 0/1; an unattached role renders as an empty cell.
/// No field in any row ever needs quoting.
pub fn encode_metrics(rows: &[MetricsRow]) -> Vec<u8> {
    let mut text = String::from(METRICS_HEADER);
    text.push('\n');
    for row in rows {
        let attached = row
            .role_attached_tick
            .map(|t| t.to_string())
            .unwrap_or_default();
        text.push_str(&format!(
            "{},{},{},{},{},{}\n",
            row.tick,
            row.request_result,
            row.observer,
            row.consecutive_observed_red,
            u8::from(row.service_account_revoked),
            attached,
        ));
    }
    text.into_bytes()
}

/// Lowercase hex SHA-256 digest of an artifact's bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

//! Frozen-artifact contract tests
//!
//! Exercises the freeze/verify cycle end to end with real engine output:
//! freeze once, verify repeatedly, and fail loudly on tampering or a
//! missing frozen copy.

use incident_replay_core::{
    encode_metrics, encode_timeline, sha256_hex, ActorsSection, ArtifactError, ArtifactStore,
    Engine, IncidentEvent, Params, RoleDetails, RunOutput, ScenarioConfig, ScenarioSection,
    ScheduledEvent, METRICS_ARTIFACT, TIMELINE_ARTIFACT,
};
use std::fs;
use tempfile::tempdir;

fn incident_output() -> RunOutput {
    let config = ScenarioConfig {
        scenario: ScenarioSection {
            name: "iam-propagation-lag".to_string(),
            max_tick: 10,
        },
        parameters: Params {
            propagation_lag_ticks: 3,
            observer_cache_ttl_ticks: 2,
            automation_trigger_after_ticks: 2,
        },
        actors: ActorsSection {
            regions: vec!["us-east".to_string()],
        },
        incident_events: vec![
            ScheduledEvent {
                tick: 0,
                event: IncidentEvent::DeployServiceAccount,
            },
            ScheduledEvent {
                tick: 0,
                event: IncidentEvent::AttachRequiredRole {
                    details: RoleDetails {
                        role: "X".to_string(),
                    },
                },
            },
            ScheduledEvent {
                tick: 0,
                event: IncidentEvent::ServiceStartsUsingServiceAccount,
            },
        ],
    };

    Engine::new(config).unwrap().run().unwrap()
}

#[test]
fn test_freeze_then_verify_roundtrip() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let output = incident_output();

    let timeline = encode_timeline(&output.timeline_lines);
    let metrics = encode_metrics(&output.metrics_rows);

    store.freeze(TIMELINE_ARTIFACT, &timeline).unwrap();
    store.freeze(METRICS_ARTIFACT, &metrics).unwrap();

    store.verify(TIMELINE_ARTIFACT, &timeline).unwrap();
    store.verify(METRICS_ARTIFACT, &metrics).unwrap();
}

/// Verify is read-only: running it twice against unmodified frozen
/// artifacts succeeds identically both times.
#[test]
fn test_reverify_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let output = incident_output();

    let timeline = encode_timeline(&output.timeline_lines);
    store.freeze(TIMELINE_ARTIFACT, &timeline).unwrap();

    let frozen_before = fs::read(store.path(TIMELINE_ARTIFACT)).unwrap();
    store.verify(TIMELINE_ARTIFACT, &timeline).unwrap();
    store.verify(TIMELINE_ARTIFACT, &timeline).unwrap();
    let frozen_after = fs::read(store.path(TIMELINE_ARTIFACT)).unwrap();

    assert_eq!(frozen_before, frozen_after);
}

#[test]
fn test_verify_without_frozen_artifacts_fails() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let output = incident_output();

    let err = store
        .verify(TIMELINE_ARTIFACT, &encode_timeline(&output.timeline_lines))
        .unwrap_err();

    match err {
        ArtifactError::Missing { path } => assert!(path.ends_with(TIMELINE_ARTIFACT)),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_tampered_artifact_fails_with_both_digests() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let output = incident_output();

    let metrics = encode_metrics(&output.metrics_rows);
    store.freeze(METRICS_ARTIFACT, &metrics).unwrap();

    // Simulated drift in the committed artifact.
    let mut tampered = metrics.clone();
    let last = tampered.len() - 2;
    tampered[last] = b'9';
    fs::write(store.path(METRICS_ARTIFACT), &tampered).unwrap();

    let err = store.verify(METRICS_ARTIFACT, &metrics).unwrap_err();
    match err {
        ArtifactError::DigestMismatch {
            name,
            expected,
            actual,
        } => {
            assert_eq!(name, METRICS_ARTIFACT);
            assert_eq!(expected, sha256_hex(&tampered));
            assert_eq!(actual, sha256_hex(&metrics));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_refreeze_overwrites_drifted_artifact() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let output = incident_output();

    let timeline = encode_timeline(&output.timeline_lines);
    store.freeze(TIMELINE_ARTIFACT, b"stale contents\n").unwrap();
    store.freeze(TIMELINE_ARTIFACT, &timeline).unwrap();

    store.verify(TIMELINE_ARTIFACT, &timeline).unwrap();
}

#[test]
fn test_encoded_artifacts_have_expected_shape() {
    let output = incident_output();

    let timeline = String::from_utf8(encode_timeline(&output.timeline_lines)).unwrap();
    assert!(timeline.ends_with('\n'));
    assert_eq!(timeline.lines().count(), output.timeline_lines.len());

    let metrics = String::from_utf8(encode_metrics(&output.metrics_rows)).unwrap();
    let mut lines = metrics.lines();
    assert_eq!(
        lines.next(),
        Some("tick,request_result,observer,consecutive_observed_red,service_account_revoked,role_attached_tick")
    );
    // 11 data rows for ticks 0..=10
    assert_eq!(lines.count(), 11);
    assert!(metrics.contains("0,PERMISSION_DENIED(us-east),RED,1,0,0"));
    assert!(metrics.contains("2,SERVICE_ACCOUNT_REVOKED,RED,3,1,0"));
}

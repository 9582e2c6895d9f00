//! Incident Replay CLI
//!
//! Replays a scripted incident scenario deterministically and either
//! freezes the timeline/metrics artifacts or verifies them against the
//! frozen copies. Verify is the default when neither mode is requested.

use anyhow::Context;
use clap::Parser;
use incident_replay_core::{
    encode_metrics, encode_timeline, ArtifactStore, Engine, RunSummary, ScenarioConfig,
    METRICS_ARTIFACT, TIMELINE_ARTIFACT,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "incident-replay")]
#[command(about = "Deterministic incident replay + frozen-output verifier")]
#[command(version)]
struct Cli {
    /// Scenario configuration document
    #[arg(long, default_value = "scenario.json")]
    config: PathBuf,

    /// Directory holding the frozen artifacts
    #[arg(long, default_value = "output")]
    outdir: PathBuf,

    /// Write/overwrite the frozen artifacts
    #[arg(long)]
    write: bool,

    /// Verify against the frozen artifacts (default)
    #[arg(long)]
    verify: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ScenarioConfig::from_path(&cli.config)
        .with_context(|| format!("loading scenario from {}", cli.config.display()))?;
    let scenario_name = config.scenario.name.clone();

    let output = Engine::new(config)?.run().context("replay aborted")?;
    info!(
        scenario = %scenario_name,
        ticks = output.metrics_rows.len(),
        "replay complete"
    );

    let timeline = encode_timeline(&output.timeline_lines);
    let metrics = encode_metrics(&output.metrics_rows);
    let store = ArtifactStore::new(&cli.outdir);

    // Verify is the default when neither mode is requested; an explicit
    // --write wins when both are given.
    let verify = cli.verify || !cli.write;
    if verify && !cli.write {
        store.verify(TIMELINE_ARTIFACT, &timeline)?;
        store.verify(METRICS_ARTIFACT, &metrics)?;
        println!("VERIFY OK");
        print_summary(&output.summary);
        return Ok(());
    }

    let timeline_path = store.freeze(TIMELINE_ARTIFACT, &timeline)?;
    let metrics_path = store.freeze(METRICS_ARTIFACT, &metrics)?;
    println!("WROTE FROZEN ARTIFACTS");
    println!("{}", timeline_path.display());
    println!("{}", metrics_path.display());
    print_summary(&output.summary);
    Ok(())
}

/// Compact summary block for human sanity; never part of the artifacts
fn print_summary(summary: &RunSummary) {
    println!("scenario_name={}", summary.scenario_name);
    println!("role_attached_tick={}", fmt_tick(summary.role_attached_tick));
    println!(
        "operator_assumption_tick={}",
        fmt_tick(summary.operator_assumption_tick)
    );
    println!(
        "automation_action_tick={}",
        fmt_tick(summary.automation_action_tick)
    );
    println!("denied_requests={}", summary.denied_requests);
    println!("revoked_requests={}", summary.revoked_requests);
}

fn fmt_tick(tick: Option<usize>) -> String {
    match tick {
        Some(t) => t.to_string(),
        None => "none".to_string(),
    }
}

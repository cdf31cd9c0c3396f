//! Orders the reference sample batch and prints the queue.
//!
//! Set `RUST_LOG=debug` to see pipeline events.

use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use u_triage::triage::{QueueBuilder, QueueConfig, Request, UrgencyTier};
use u_triage::TriageError;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn sample_batch() -> Vec<Request> {
    use UrgencyTier::*;
    [
        ("P1", Tier2, 15.0, 80.0),
        ("P2", Tier1, 5.0, 95.0),
        ("P3", Tier3, 35.0, 40.0),
        ("P4", Tier4, 10.0, 10.0),
        ("P5", Tier2, 60.0, 30.0),
        ("P6", Tier1, 2.0, 60.0),
        ("P7", Tier3, 120.0, 50.0),
        ("P8", Tier2, 25.0, 70.0),
        ("P9", Tier4, 5.0, 20.0),
        ("P10", Tier2, 45.0, 85.0),
    ]
    .into_iter()
    .zip(0u64..)
    .map(|((id, tier, wait, severity), idx)| Request::new(id, tier, wait, severity, idx))
    .collect()
}

/// Exit status for a failed build: 2 for a rejected configuration, 1 for
/// anything else.
fn failure_code(err: &TriageError) -> u8 {
    if err.is_config_error() {
        2
    } else {
        1
    }
}

fn main() -> ExitCode {
    init_tracing();

    let config = QueueConfig::default();
    info!(
        w_urgency = config.weights.urgency,
        w_wait = config.weights.wait,
        w_severity = config.weights.severity,
        shortlist_fraction = config.shortlist_fraction,
        "building sample queue"
    );

    match QueueBuilder::new(config).build(&sample_batch()) {
        Ok(queue) => {
            print!("{queue}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, config_error = e.is_config_error(), "queue build failed");
            ExitCode::from(failure_code(&e))
        }
    }
}

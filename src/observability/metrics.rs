//! Metrics collection.
//!
//! # Metrics
//! - `gate_probe_attempts_total` (counter): connect attempts by dependency, outcome
//! - `gate_dependency_wait_seconds` (histogram): time until a dependency answered
//! - `gate_stage_failures_total` (counter): terminal failures by stage
//!
//! No recorder is installed by the binary; these are no-ops unless an
//! embedding program installs one.

use std::time::Duration;

use metrics::{counter, histogram};

/// Record a single connect attempt.
pub fn record_probe_attempt(dependency: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(
        "gate_probe_attempts_total",
        "dependency" => dependency.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record how long a dependency took to become reachable.
pub fn record_dependency_wait(dependency: &str, elapsed: Duration) {
    histogram!(
        "gate_dependency_wait_seconds",
        "dependency" => dependency.to_string()
    )
    .record(elapsed.as_secs_f64());
}

/// Record a terminal failure in `stage`.
pub fn record_stage_failure(stage: &'static str) {
    counter!("gate_stage_failures_total", "stage" => stage).increment(1);
}

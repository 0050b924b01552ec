//! Bounded wait until a dependency accepts connections.

use std::time::Duration;
use tokio::time;

use crate::config::{DependencyConfig, ProbeConfig};
use crate::error::{GateError, GateResult};
use crate::observability::metrics;
use crate::probe::tcp::probe_once;
use crate::resilience::backoff::probe_delay;
use crate::resilience::Deadline;

/// Result of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Connect attempts made, including the successful one.
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Probe `dep` until it accepts a TCP connection or its timeout elapses.
///
/// Each attempt is bounded by `connect_timeout_ms` and by the time left.
/// Between attempts the task sleeps with exponential backoff.
pub async fn wait_until_reachable(
    dep: &DependencyConfig,
    probe: &ProbeConfig,
) -> GateResult<ProbeOutcome> {
    let deadline = Deadline::after(Duration::from_secs(dep.timeout_secs));
    let connect_timeout = Duration::from_millis(probe.connect_timeout_ms);
    let mut attempts = 0u32;

    loop {
        if attempts > 0 && deadline.is_expired() {
            break;
        }
        attempts += 1;

        match probe_once(&dep.host, dep.port, deadline.clamp(connect_timeout)).await {
            Ok(()) => {
                let elapsed = deadline.elapsed();
                metrics::record_probe_attempt(&dep.name, true);
                metrics::record_dependency_wait(&dep.name, elapsed);
                tracing::debug!(
                    dependency = %dep.name,
                    address = %dep.address(),
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Dependency reachable"
                );
                return Ok(ProbeOutcome { attempts, elapsed });
            }
            Err(e) => {
                metrics::record_probe_attempt(&dep.name, false);
                tracing::debug!(
                    dependency = %dep.name,
                    address = %dep.address(),
                    attempt = attempts,
                    error = %e,
                    "Probe failed"
                );
            }
        }

        let delay = probe_delay(attempts, probe, deadline.remaining());
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
    }

    tracing::warn!(
        dependency = %dep.name,
        address = %dep.address(),
        timeout_secs = dep.timeout_secs,
        attempts,
        "Dependency not reachable before timeout"
    );

    Err(GateError::DependencyUnreachable {
        name: dep.name.clone(),
        address: dep.address(),
        timeout_secs: dep.timeout_secs,
        attempts,
    })
}

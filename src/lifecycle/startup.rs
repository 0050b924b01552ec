//! Startup orchestration: the readiness gate.
//!
//! # Stages
//! ```text
//! Waiting(database) → Waiting(redis) → Migrating → Running
//!         │                  │              │
//!         └──────────────────┴──────────────┴────→ Failed
//! ```
//!
//! Stages run strictly in order and never go back. `Migrating` is skipped
//! only when migrations are disabled in the configuration. With
//! `FailureMode::ProbeAll` the remaining dependencies are still probed
//! after the first unreachable one, for diagnostics, before `Failed`.

use std::fmt;

use crate::config::{FailureMode, GateConfig};
use crate::error::{GateError, GateResult};
use crate::lifecycle::handoff::Handoff;
use crate::lifecycle::migrate::run_migration;
use crate::observability::{metrics, Progress};
use crate::probe::wait_until_reachable;

/// A stage of the startup sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for the named dependency.
    Waiting(String),
    Migrating,
    /// Handing over to the command.
    Running,
    Failed,
}

impl Stage {
    fn label(&self) -> &'static str {
        match self {
            Stage::Waiting(_) => "waiting",
            Stage::Migrating => "migrating",
            Stage::Running => "running",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Waiting(name) => write!(f, "waiting({})", name),
            other => f.write_str(other.label()),
        }
    }
}

/// Drives the startup sequence for one configuration.
#[derive(Debug)]
pub struct ReadinessGate<'a> {
    config: &'a GateConfig,
    progress: Progress,
    history: Vec<Stage>,
}

impl<'a> ReadinessGate<'a> {
    pub fn new(config: &'a GateConfig, progress: Progress) -> Self {
        Self {
            config,
            progress,
            history: Vec::new(),
        }
    }

    /// Current stage, `None` before `run`.
    pub fn stage(&self) -> Option<&Stage> {
        self.history.last()
    }

    /// Every stage entered so far, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    fn enter(&mut self, stage: Stage) {
        tracing::info!(stage = %stage, "Entering stage");
        self.history.push(stage);
    }

    fn fail(&mut self, err: GateError) -> GateError {
        let stage = self.stage().map(Stage::label).unwrap_or("init");
        metrics::record_stage_failure(stage);
        tracing::error!(stage, error = %err, "Startup failed");
        self.enter(Stage::Failed);
        err
    }

    /// Run every stage up to `Running`.
    ///
    /// On `Ok` the caller hands the process over to `command`. On `Err`
    /// neither migration (if not yet reached) nor the command has run.
    pub async fn run(&mut self, command: &Handoff) -> GateResult<()> {
        if let Err(err) = self.wait_for_dependencies().await {
            return Err(self.fail(err));
        }

        if self.config.migration.enabled {
            if let Err(err) = self.migrate().await {
                return Err(self.fail(err));
            }
        } else {
            self.progress.line(format_args!("Skipping migrations"));
        }

        self.enter(Stage::Running);
        self.progress
            .line(format_args!("Starting: {}", command.command_line()));
        Ok(())
    }

    async fn wait_for_dependencies(&mut self) -> GateResult<()> {
        let config = self.config;
        let mut first_error = None;

        for dep in &config.dependencies {
            self.enter(Stage::Waiting(dep.name.clone()));
            self.progress.line(format_args!(
                "Waiting for {} at {} (timeout {}s)...",
                dep.name,
                dep.address(),
                dep.timeout_secs
            ));

            match wait_until_reachable(dep, &config.probe).await {
                Ok(outcome) => {
                    self.progress.line(format_args!(
                        "{} is up ({} after {} attempt{}, {:.1}s)",
                        dep.name,
                        dep.address(),
                        outcome.attempts,
                        if outcome.attempts == 1 { "" } else { "s" },
                        outcome.elapsed.as_secs_f64()
                    ));
                }
                // The returned error is reported by the caller; only the
                // extra failures seen with ProbeAll are written here.
                Err(err) => match config.failure_mode {
                    FailureMode::FailFast => return Err(err),
                    FailureMode::ProbeAll if first_error.is_none() => first_error = Some(err),
                    FailureMode::ProbeAll => {
                        self.progress.diagnostic(format_args!("ready-gate: {}", err));
                    }
                },
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn migrate(&mut self) -> GateResult<()> {
        self.enter(Stage::Migrating);
        self.progress.line(format_args!(
            "Running migrations: {}",
            self.config.migration.command
        ));
        run_migration(&self.config.migration).await?;
        self.progress.line(format_args!("Migrations complete"));
        Ok(())
    }
}

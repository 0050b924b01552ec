//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, parse_wait_target};
use crate::config::validation::validate_config;
use crate::config::{ConfigError, FailureMode, GateConfig};
use crate::error::GateResult;

#[derive(Parser, Debug)]
#[command(name = "ready-gate")]
#[command(
    version,
    about = "Wait for the database and cache, run migrations, then exec a command",
    long_about = None
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "READY_GATE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for each dependency (overrides WAIT_TIMEOUT)
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Additional dependency to wait for after the database and cache
    #[arg(short, long = "wait", value_name = "HOST:PORT")]
    pub wait: Vec<String>,

    /// Migration shell command (overrides MIGRATION_COMMAND)
    #[arg(long, value_name = "CMD")]
    pub migrate_cmd: Option<String>,

    /// Do not run migrations
    #[arg(long)]
    pub skip_migrations: bool,

    /// Keep probing remaining dependencies after one is unreachable
    #[arg(long)]
    pub probe_all: bool,

    /// Run the command as a child instead of replacing this process
    #[arg(long)]
    pub no_exec: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Command to run once everything is ready
    #[arg(
        value_name = "COMMAND",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "print_config"
    )]
    pub command: Vec<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the validated configuration: file and environment via `lookup`,
    /// then the flags given on the command line.
    pub fn resolve_config<F>(&self, lookup: F) -> GateResult<GateConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = load_config(self.config.as_deref(), lookup)?;

        if let Some(secs) = self.timeout {
            config.set_timeout_secs(secs);
        }

        let wait_timeout = self
            .timeout
            .or_else(|| config.dependencies.first().map(|d| d.timeout_secs))
            .unwrap_or(30);
        for target in &self.wait {
            config.dependencies.push(parse_wait_target(target, wait_timeout)?);
        }

        if let Some(cmd) = &self.migrate_cmd {
            config.migration.command = cmd.clone();
        }
        if self.skip_migrations {
            config.migration.enabled = false;
        }
        if self.probe_all {
            config.failure_mode = FailureMode::ProbeAll;
        }
        if self.quiet {
            config.observability.quiet = true;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

//! ready-gate: wait for dependencies, migrate, then exec.
//!
//! # Flow
//!
//! ```text
//!   env / config file / flags
//!            │
//!            ▼
//!      ┌───────────┐    ┌───────────┐    ┌───────────┐    ┌───────────┐
//!      │ wait: db  │───▶│ wait:     │───▶│ migrate   │───▶│ exec      │
//!      │           │    │ cache     │    │ (sh -c)   │    │ COMMAND   │
//!      └─────┬─────┘    └─────┬─────┘    └─────┬─────┘    └───────────┘
//!            └────────────────┴────────────────┴──▶ exit 1
//! ```

use std::process::ExitCode;

use ready_gate::cli::Cli;
use ready_gate::error::{GateError, EXIT_FAILURE};
use ready_gate::lifecycle::block_on_detached;
use ready_gate::observability::logging::init_logging;
use ready_gate::observability::Progress;
use ready_gate::{Handoff, ReadinessGate};

fn fail(err: &GateError) -> ExitCode {
    eprintln!("ready-gate: {}", err);
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = match cli.resolve_config(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    if cli.print_config {
        return match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ready-gate: failed to render configuration: {}", e);
                ExitCode::from(EXIT_FAILURE)
            }
        };
    }

    init_logging(&config.observability);

    let handoff = match Handoff::from_argv(cli.command.clone()) {
        Ok(handoff) => handoff,
        Err(e) => return fail(&e),
    };

    tracing::info!(
        dependencies = config.dependencies.len(),
        migrations = config.migration.enabled,
        command = %handoff.command_line(),
        "ready-gate v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    // Single-threaded: dependencies are probed one after another.
    let mut gate = ReadinessGate::new(&config, Progress::stdout(config.observability.quiet));
    match block_on_detached(gate.run(&handoff)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return fail(&e),
        Err(e) => {
            eprintln!("ready-gate: failed to start runtime: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    }
    drop(gate);

    let result = if cli.no_exec {
        handoff.spawn_and_wait()
    } else {
        handoff.exec()
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => fail(&e),
    }
}

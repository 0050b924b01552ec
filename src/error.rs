//! Errors that end the startup sequence, and the exit status each maps to.

use thiserror::Error;

use crate::config::ConfigError;

/// Exit status for dependency and migration failures.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for configuration and usage errors.
pub const EXIT_USAGE: u8 = 2;
/// The command exists but could not be executed.
pub const EXIT_CANNOT_EXECUTE: u8 = 126;
/// The command was not found.
pub const EXIT_NOT_FOUND: u8 = 127;

/// Terminal failures of the readiness gate.
#[derive(Debug, Error)]
pub enum GateError {
    /// A dependency did not accept a connection before its timeout.
    #[error("{name} at {address} not reachable after {timeout_secs}s ({attempts} attempts)")]
    DependencyUnreachable {
        name: String,
        address: String,
        timeout_secs: u64,
        attempts: u32,
    },

    /// The migration command ran and exited unsuccessfully.
    #[error("migration failed ({})", describe_code(.code))]
    MigrationFailed { code: Option<i32> },

    /// The migration command could not be started.
    #[error("failed to start migration: {0}")]
    MigrationSpawn(#[source] std::io::Error),

    /// The handed-over command could not be started.
    #[error("failed to execute '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Nothing to hand over to.
    #[error("no command given")]
    EmptyCommand,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl GateError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            GateError::DependencyUnreachable { .. }
            | GateError::MigrationFailed { .. }
            | GateError::MigrationSpawn(_) => EXIT_FAILURE,
            GateError::CommandSpawn { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                _ => EXIT_CANNOT_EXECUTE,
            },
            GateError::EmptyCommand | GateError::Config(_) => EXIT_USAGE,
        }
    }
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

//! Schema migration step.
//!
//! The migration command is a shell line (`sh -c`) so deployments can use
//! whatever their framework ships (`python manage.py migrate`, `alembic
//! upgrade head`, ...). It inherits stdio and is awaited to completion.

use std::process::Stdio;
use tokio::process::Command;

use crate::config::MigrationConfig;
use crate::error::{GateError, GateResult};

#[cfg(unix)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(line);
    cmd
}

/// Run the migration command and wait for it.
pub async fn run_migration(config: &MigrationConfig) -> GateResult<()> {
    let mut cmd = shell_command(&config.command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = &config.working_dir {
        cmd.current_dir(dir);
    }

    tracing::debug!(command = %config.command, "Spawning migration");
    let status = cmd.status().await.map_err(GateError::MigrationSpawn)?;

    if status.success() {
        Ok(())
    } else {
        Err(GateError::MigrationFailed { code: status.code() })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn migration(command: &str) -> MigrationConfig {
        MigrationConfig {
            enabled: true,
            command: command.into(),
            working_dir: None,
        }
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        run_migration(&migration("true")).await.unwrap();
    }

    #[tokio::test]
    async fn non_zero_exit_carries_code() {
        let err = run_migration(&migration("exit 3")).await.unwrap_err();
        assert!(matches!(err, GateError::MigrationFailed { code: Some(3) }));
    }

    #[tokio::test]
    async fn signal_has_no_code() {
        let err = run_migration(&migration("kill -KILL $$")).await.unwrap_err();
        assert!(matches!(err, GateError::MigrationFailed { code: None }));
    }

    #[tokio::test]
    async fn runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = migration("touch migrated");
        config.working_dir = Some(dir.path().display().to_string());
        run_migration(&config).await.unwrap();
        assert!(dir.path().join("migrated").exists());
    }

    #[tokio::test]
    async fn missing_working_dir_is_spawn_error() {
        let mut config = migration("true");
        config.working_dir = Some("/nonexistent/ready-gate".into());
        let err = run_migration(&config).await.unwrap_err();
        assert!(matches!(err, GateError::MigrationSpawn(_)));
    }
}

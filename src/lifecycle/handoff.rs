//! Handing the process over to the supplied command.
//!
//! On Unix the command replaces the gate's process image, so it keeps the
//! PID, signal disposition and standard streams, and its exit status is the
//! container's. Elsewhere (or with `--no-exec`) the command is spawned and
//! its exit status propagated.

use std::process::{Command, ExitStatus};

use crate::error::{GateError, GateResult, EXIT_FAILURE};

/// The command to run once every stage has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    program: String,
    args: Vec<String>,
}

impl Handoff {
    /// Build from a full argument vector; the first element is the program.
    pub fn from_argv(argv: Vec<String>) -> GateResult<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next().ok_or(GateError::EmptyCommand)?;
        if program.is_empty() {
            return Err(GateError::EmptyCommand);
        }
        Ok(Self {
            program,
            args: argv.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Space-joined command line for progress output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> GateError {
        GateError::CommandSpawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Replace the current process with the command.
    ///
    /// Only returns if the exec itself failed.
    #[cfg(unix)]
    pub fn exec(self) -> GateResult<u8> {
        use std::os::unix::process::CommandExt;

        tracing::debug!(program = %self.program, "Exec");
        let source = self.command().exec();
        Err(self.spawn_error(source))
    }

    #[cfg(not(unix))]
    pub fn exec(self) -> GateResult<u8> {
        self.spawn_and_wait()
    }

    /// Run the command as a child and return the exit status to propagate.
    pub fn spawn_and_wait(&self) -> GateResult<u8> {
        tracing::debug!(program = %self.program, "Spawning command");
        let status = self
            .command()
            .status()
            .map_err(|e| self.spawn_error(e))?;
        Ok(exit_code(status))
    }
}

/// Exit status for the parent; signals map to `128 + signal` like a shell.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return (code & 0xff) as u8;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return (128 + signal).min(255) as u8;
        }
    }

    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_argv_is_rejected() {
        assert!(matches!(Handoff::from_argv(vec![]), Err(GateError::EmptyCommand)));
        assert!(matches!(Handoff::from_argv(argv(&[""])), Err(GateError::EmptyCommand)));
    }

    #[test]
    fn splits_program_and_args() {
        let handoff =
            Handoff::from_argv(argv(&["pytest", "-x", "--ds=core.settings_test"])).unwrap();
        assert_eq!(handoff.program(), "pytest");
        assert_eq!(handoff.args(), ["-x", "--ds=core.settings_test"]);
        assert_eq!(handoff.command_line(), "pytest -x --ds=core.settings_test");
    }

    #[cfg(unix)]
    #[test]
    fn propagates_exit_code() {
        let handoff = Handoff::from_argv(argv(&["sh", "-c", "exit 7"])).unwrap();
        assert_eq!(handoff.spawn_and_wait().unwrap(), 7);

        let handoff = Handoff::from_argv(argv(&["true"])).unwrap();
        assert_eq!(handoff.spawn_and_wait().unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn signal_maps_to_shell_convention() {
        let handoff = Handoff::from_argv(argv(&["sh", "-c", "kill -TERM $$"])).unwrap();
        assert_eq!(handoff.spawn_and_wait().unwrap(), 143);
    }

    #[test]
    fn missing_program_maps_to_127() {
        let handoff = Handoff::from_argv(argv(&["ready-gate-no-such-program"])).unwrap();
        let err = handoff.spawn_and_wait().unwrap_err();
        assert_eq!(err.exit_code(), 127);
    }
}

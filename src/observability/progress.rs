//! Human-readable progress lines.
//!
//! One line per stage event, flushed immediately so it interleaves
//! correctly with output from the migration and the handed-over command.
//! Failure diagnostics go to a separate sink (stderr) and ignore `quiet`.

use std::fmt;
use std::io::{self, Write};

/// Writes progress lines to stdout and diagnostics to stderr (or any
/// writers in tests).
pub struct Progress {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    quiet: bool,
}

impl Progress {
    /// Progress on the process's stdout, diagnostics on its stderr.
    pub fn stdout(quiet: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet)
    }

    pub fn new(
        out: impl Write + Send + 'static,
        err: impl Write + Send + 'static,
        quiet: bool,
    ) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            quiet,
        }
    }

    /// Write one progress line unless quiet.
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.quiet {
            return;
        }
        write_line(&mut self.out, args);
    }

    /// Write one failure diagnostic.
    pub fn diagnostic(&mut self, args: fmt::Arguments<'_>) {
        write_line(&mut self.err, args);
    }
}

// A closed stream must not abort startup; write errors are only logged.
fn write_line(sink: &mut Box<dyn Write + Send>, args: fmt::Arguments<'_>) {
    let result = writeln!(sink, "{}", args).and_then(|_| sink.flush());
    if let Err(e) = result {
        tracing::debug!(error = %e, "Failed to write progress line");
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress").field("quiet", &self.quiet).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_lines_unless_quiet() {
        let out = Buffer::default();
        let mut progress = Progress::new(out.clone(), Buffer::default(), false);
        progress.line(format_args!("Waiting for {}", "db"));
        progress.line(format_args!("done"));
        assert_eq!(out.contents(), "Waiting for db\ndone\n");

        let quiet_out = Buffer::default();
        let mut quiet = Progress::new(quiet_out.clone(), Buffer::default(), true);
        quiet.line(format_args!("hidden"));
        assert!(quiet_out.contents().is_empty());
    }

    #[test]
    fn diagnostics_use_error_sink_even_when_quiet() {
        let out = Buffer::default();
        let err = Buffer::default();
        let mut progress = Progress::new(out.clone(), err.clone(), true);
        progress.diagnostic(format_args!("redis is unreachable"));
        assert!(out.contents().is_empty());
        assert_eq!(err.contents(), "redis is unreachable\n");
    }
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gate stages produce:
//!     → progress.rs (plain progress lines on stdout)
//!     → logging.rs (structured tracing events on stderr)
//!     → metrics.rs (counters, histograms)
//! ```

pub mod logging;
pub mod metrics;
pub mod progress;

pub use progress::Progress;

//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Waiting for a dependency:
//!     → timeouts.rs (deadline per dependency, clamp each attempt)
//!     → On failure: backoff.rs (exponential delay + jitter, capped by deadline)
//! ```

pub mod backoff;
pub mod timeouts;

pub use timeouts::Deadline;

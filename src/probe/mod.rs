//! Dependency probing.
//!
//! # Data Flow
//! ```text
//! wait.rs:
//!     Deadline per dependency
//!     → tcp.rs connect attempt (bounded)
//!     → on failure: backoff sleep, retry until deadline
//! ```

pub mod tcp;
pub mod wait;

pub use tcp::{probe_once, ProbeError};
pub use wait::{wait_until_reachable, ProbeOutcome};

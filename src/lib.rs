//! Service readiness gate.
//!
//! Container entrypoint that blocks until the backend's datastore and
//! cache accept TCP connections, runs schema migrations, then replaces
//! itself with the requested command (test runner or server).

pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod resilience;

pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use lifecycle::{Handoff, ReadinessGate, Stage};

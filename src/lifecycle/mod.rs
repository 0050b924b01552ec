//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Wait for each dependency → Migrate (migrate.rs) → Running
//!
//! Runtime (runtime.rs):
//!     Current-thread runtime for the waiting stages, shut down detached
//!
//! Handoff (handoff.rs):
//!     Running → exec the supplied command (or spawn, wait, propagate)
//! ```
//!
//! Any failure before `Running` is fatal: nothing after it runs.

pub mod handoff;
pub mod migrate;
pub mod runtime;
pub mod startup;

pub use handoff::Handoff;
pub use runtime::block_on_detached;
pub use startup::{ReadinessGate, Stage};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → loader.rs (environment overlay)
//!     → cli.rs (command line overrides)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable, passed by reference)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    DependencyConfig, DependencyRole, FailureMode, GateConfig, MigrationConfig,
    ObservabilityConfig, ProbeConfig,
};
pub use validation::ValidationError;

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the readiness gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Dependencies to wait for, probed in this order.
    pub dependencies: Vec<DependencyConfig>,

    /// Probe timing.
    pub probe: ProbeConfig,

    /// Schema migration step.
    pub migration: MigrationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Whether a failed dependency stops probing of the rest.
    pub failure_mode: FailureMode,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            dependencies: vec![DependencyConfig::datastore(), DependencyConfig::cache()],
            probe: ProbeConfig::default(),
            migration: MigrationConfig::default(),
            observability: ObservabilityConfig::default(),
            failure_mode: FailureMode::default(),
        }
    }
}

impl GateConfig {
    /// First dependency with the given role, if any.
    pub fn dependency_mut(&mut self, role: DependencyRole) -> Option<&mut DependencyConfig> {
        self.dependencies.iter_mut().find(|d| d.role == role)
    }

    /// Override every dependency's timeout.
    pub fn set_timeout_secs(&mut self, secs: u64) {
        for dep in &mut self.dependencies {
            dep.timeout_secs = secs;
        }
    }
}

/// What a dependency is, as far as the deployment is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyRole {
    /// Relational database.
    Datastore,
    /// Cache / job queue store.
    Cache,
    /// Anything else given with `--wait`.
    Service,
}

impl std::fmt::Display for DependencyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyRole::Datastore => write!(f, "datastore"),
            DependencyRole::Cache => write!(f, "cache"),
            DependencyRole::Service => write!(f, "service"),
        }
    }
}

/// A network dependency that must accept TCP connections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DependencyConfig {
    /// Identifier used in progress output and logs.
    pub name: String,

    #[serde(default = "default_role")]
    pub role: DependencyRole,

    /// Host name or IP address.
    pub host: String,

    pub port: u16,

    /// How long to keep probing before giving up, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_role() -> DependencyRole {
    DependencyRole::Service
}

fn default_timeout_secs() -> u64 {
    30
}

impl DependencyConfig {
    /// The database the backend migrates into.
    pub fn datastore() -> Self {
        Self {
            name: "database".to_string(),
            role: DependencyRole::Datastore,
            host: "db".to_string(),
            port: 5432,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// The cache and job queue store.
    pub fn cache() -> Self {
        Self {
            name: "redis".to_string(),
            role: DependencyRole::Cache,
            host: "redis".to_string(),
            port: 6379,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// `host:port`, bracketing IPv6 literals.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Probe timing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Upper bound for a single connect attempt in milliseconds.
    pub connect_timeout_ms: u64,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay between attempts in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 1000,
            base_delay_ms: 100,
            max_delay_ms: 1000,
        }
    }
}

/// Schema migration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Run the migration stage at all.
    pub enabled: bool,

    /// Shell command line, run with `sh -c`.
    pub command: String,

    /// Working directory for the command. Inherited when unset.
    pub working_dir: Option<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "python manage.py migrate --noinput".to_string(),
            working_dir: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) for the gate's own events.
    pub log_level: String,

    /// Suppress progress lines on stdout.
    pub quiet: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            quiet: false,
        }
    }
}

/// Behavior after the first unreachable dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the first unreachable dependency.
    #[default]
    FailFast,
    /// Keep probing the remaining dependencies for diagnostics, then fail.
    ProbeAll,
}

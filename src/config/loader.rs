//! Configuration loading from disk and the environment.
//!
//! Environment access goes through a lookup function so callers decide
//! where values come from; `main` passes `std::env::var`, tests pass a map.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::{Host, Url};

use crate::config::schema::{DependencyConfig, DependencyRole, GateConfig};
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var} ({value:?}): {reason}")]
    Env {
        var: String,
        value: String,
        reason: String,
    },

    #[error("invalid dependency '{value}': {reason}")]
    Dependency { value: String, reason: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file. Missing sections fall back to defaults.
pub fn load_config_file(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Build the configuration from defaults, an optional file, and the environment.
///
/// The result is not validated yet; CLI overrides are applied on top first.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<GateConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => GateConfig::default(),
    };
    apply_env(&mut config, lookup)?;
    Ok(config)
}

/// Environment variables describing one dependency.
struct DependencyVars {
    role: DependencyRole,
    host: &'static str,
    port: &'static str,
    url: &'static str,
}

const DEPENDENCY_VARS: [DependencyVars; 2] = [
    DependencyVars {
        role: DependencyRole::Datastore,
        host: "DB_HOST",
        port: "DB_PORT",
        url: "DATABASE_URL",
    },
    DependencyVars {
        role: DependencyRole::Cache,
        host: "REDIS_HOST",
        port: "REDIS_PORT",
        url: "REDIS_URL",
    },
];

/// Overlay environment variables onto `config`.
///
/// `*_HOST` wins over `*_URL`; `*_PORT` wins over the port in `*_URL`.
/// Empty values are treated as unset.
pub fn apply_env<F>(config: &mut GateConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    for vars in &DEPENDENCY_VARS {
        let Some(dep) = config.dependency_mut(vars.role) else {
            continue;
        };

        if let Some(host) = get(vars.host) {
            dep.host = host;
        } else if let Some(raw) = get(vars.url) {
            let (host, port) = parse_service_url(vars.url, &raw)?;
            dep.host = host;
            if let Some(port) = port {
                dep.port = port;
            }
        }

        if let Some(raw) = get(vars.port) {
            dep.port = parse_port(vars.port, &raw)?;
        }
    }

    if let Some(raw) = get("WAIT_TIMEOUT") {
        let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Env {
            var: "WAIT_TIMEOUT".into(),
            value: raw.clone(),
            reason: e.to_string(),
        })?;
        config.set_timeout_secs(secs);
    }

    if let Some(command) = get("MIGRATION_COMMAND") {
        config.migration.command = command;
    }

    if let Some(raw) = get("MIGRATION_ENABLED") {
        config.migration.enabled = parse_bool("MIGRATION_ENABLED", &raw)?;
    }

    if let Some(level) = get("READY_GATE_LOG") {
        config.observability.log_level = level;
    }

    Ok(())
}

fn parse_port(var: &str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse::<u16>().map_err(|e| ConfigError::Env {
        var: var.into(),
        value: raw.into(),
        reason: e.to_string(),
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env {
            var: var.into(),
            value: raw.into(),
            reason: "expected a boolean (1/0, true/false, yes/no)".into(),
        }),
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "postgres" | "postgresql" => Some(5432),
        "mysql" => Some(3306),
        "redis" | "rediss" => Some(6379),
        _ => None,
    }
}

/// Extract host and port from a connection URL such as `redis://redis:6379/2`.
fn parse_service_url(var: &str, raw: &str) -> Result<(String, Option<u16>), ConfigError> {
    let env_err = |reason: String| ConfigError::Env {
        var: var.into(),
        value: raw.into(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| env_err(e.to_string()))?;
    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => return Err(env_err("URL has no host".into())),
    };
    let port = url.port().or_else(|| default_port(url.scheme()));
    Ok((host, port))
}

/// Parse a `--wait` argument (`host:port` or `[v6]:port`) into a dependency.
pub fn parse_wait_target(value: &str, timeout_secs: u64) -> Result<DependencyConfig, ConfigError> {
    let dep_err = |reason: &str| ConfigError::Dependency {
        value: value.into(),
        reason: reason.into(),
    };

    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| dep_err("expected HOST:PORT"))?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(dep_err("host is empty"));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| dep_err("port must be a number between 1 and 65535"))?;

    Ok(DependencyConfig {
        name: format!("{}:{}", host, port),
        role: DependencyRole::Service,
        host: host.to_string(),
        port,
        timeout_secs,
    })
}

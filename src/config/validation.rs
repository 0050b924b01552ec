//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, delays non-zero)
//! - Detect duplicate dependency names
//!
//! Returns all validation errors, not just the first.

use std::collections::HashSet;

use crate::config::schema::GateConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Longest accepted wait for a single dependency (one week).
pub const MAX_TIMEOUT_SECS: u64 = 7 * 86_400;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration before it is accepted.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.dependencies.is_empty() {
        errors.push(ValidationError::new(
            "dependencies",
            "at least one dependency is required",
        ));
    }

    let mut seen = HashSet::new();
    for (i, dep) in config.dependencies.iter().enumerate() {
        let field = format!("dependencies[{}]", i);
        if dep.name.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.name", field), "must not be empty"));
        } else if !seen.insert(dep.name.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.name", field),
                format!("duplicate dependency name '{}'", dep.name),
            ));
        }
        if dep.host.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.host", field), "must not be empty"));
        }
        if dep.port == 0 {
            errors.push(ValidationError::new(
                format!("{}.port", field),
                "must be between 1 and 65535",
            ));
        }
        if dep.timeout_secs == 0 {
            errors.push(ValidationError::new(
                format!("{}.timeout_secs", field),
                "must be greater than 0",
            ));
        } else if dep.timeout_secs > MAX_TIMEOUT_SECS {
            errors.push(ValidationError::new(
                format!("{}.timeout_secs", field),
                format!("must be at most {} seconds", MAX_TIMEOUT_SECS),
            ));
        }
    }

    let probe = &config.probe;
    if probe.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("probe.connect_timeout_ms", "must be greater than 0"));
    }
    // A zero base delay would turn the wait loop into a spin.
    if probe.base_delay_ms == 0 {
        errors.push(ValidationError::new("probe.base_delay_ms", "must be greater than 0"));
    }
    if probe.max_delay_ms < probe.base_delay_ms {
        errors.push(ValidationError::new(
            "probe.max_delay_ms",
            format!("must be at least base_delay_ms ({})", probe.base_delay_ms),
        ));
    }

    if config.migration.enabled && config.migration.command.trim().is_empty() {
        errors.push(ValidationError::new(
            "migration.command",
            "must not be empty while migrations are enabled",
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DependencyConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = GateConfig::default();
        config.dependencies[0].port = 0;
        config.dependencies[1].timeout_secs = 0;
        config.probe.base_delay_ms = 0;
        config.migration.command = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "dependencies[0].port",
                "dependencies[1].timeout_secs",
                "probe.base_delay_ms",
                "migration.command",
            ]
        );
    }

    #[test]
    fn timeout_upper_bound() {
        let mut config = GateConfig::default();
        config.set_timeout_secs(MAX_TIMEOUT_SECS);
        assert!(validate_config(&config).is_ok());

        config.dependencies[1].timeout_secs = MAX_TIMEOUT_SECS + 1;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "dependencies[1].timeout_secs");

        config.set_timeout_secs(u64::MAX);
        assert_eq!(validate_config(&config).unwrap_err().len(), 2);
    }

    #[test]
    fn disabled_migration_may_have_empty_command() {
        let mut config = GateConfig::default();
        config.migration.enabled = false;
        config.migration.command.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_duplicate_names_and_empty_list() {
        let mut config = GateConfig::default();
        config.dependencies.push(DependencyConfig::cache());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("duplicate"));

        config.dependencies.clear();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "dependencies");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = GateConfig::default();
        config.observability.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "observability.log_level: unknown level 'loud'");
    }
}

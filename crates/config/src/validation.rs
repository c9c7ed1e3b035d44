//! Configuration validation

use crate::{AppConfig, ConfigError, Result};
use std::collections::HashSet;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
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

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // Validate runtime config
    if let Err(e) = validate_log_level(&config.runtime.log_level) {
        errors.push(e);
    }

    // Validate flags
    for (idx, flag) in config.flags.enabled.iter().enumerate() {
        if flag.is_empty() {
            errors.push(ValidationError::new(
                format!("flags.enabled[{idx}]"),
                "flag name cannot be empty",
            ));
        }
    }

    // Check for duplicate flags
    let flag_set: HashSet<_> = config.flags.enabled.iter().collect();
    if flag_set.len() != config.flags.enabled.len() {
        errors.push(ValidationError::new(
            "flags.enabled",
            "duplicate flag names found",
        ));
    }

    // Validate gsuite config
    for (idx, country) in config.gsuite.eligible_countries.iter().enumerate() {
        if let Err(e) = validate_country_code(country) {
            errors.push(ValidationError::new(
                format!("gsuite.eligible_countries[{idx}]"),
                e,
            ));
        }
    }

    if let Some(country) = &config.gsuite.user_country {
        if let Err(e) = validate_country_code(country) {
            errors.push(ValidationError::new("gsuite.user_country", e));
        }
    }

    if !errors.is_empty() {
        let error_msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigError::ValidationError(error_msg));
    }

    Ok(())
}

/// Validate an ISO 3166-1 alpha-2 country code
pub fn validate_country_code(code: &str) -> std::result::Result<(), String> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(format!(
            "invalid country code '{code}', expected two uppercase ASCII letters"
        ));
    }
    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "runtime.log_level",
            format!(
                "invalid log level '{level}', must be one of: trace, debug, info, warn, error"
            ),
        )),
    }
}

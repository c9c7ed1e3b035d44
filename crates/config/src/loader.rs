//! Configuration loading from multiple sources

use crate::{AppConfig, ConfigError, FlagsConfig, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "CHECKOUT_ROUTER";

/// Configuration loader with support for multiple formats and sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// Supports TOML, YAML, and JSON formats based on file extension
    pub fn from_file(path: &Path) -> Result<AppConfig> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let content = std::fs::read_to_string(path)?;

        match extension {
            "toml" => Self::from_toml(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {}",
                extension
            ))),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<AppConfig> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(content: &str) -> Result<AppConfig> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<AppConfig> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from environment variables
    ///
    /// Uses default prefix "CHECKOUT_ROUTER"
    pub fn from_env() -> Result<AppConfig> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Load configuration from environment variables with custom prefix
    ///
    /// Environment variables should be in the format: PREFIX_SECTION_KEY
    /// For example: CHECKOUT_ROUTER_RUNTIME_ENVIRONMENT=production
    pub fn from_env_with_prefix(prefix: &str) -> Result<AppConfig> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).separator("_"))
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }

    /// Merge two configurations, with overlay taking precedence
    ///
    /// Enabled flag lists are unioned; the other sections are replaced
    /// wholesale by the overlay.
    pub fn merge(base: AppConfig, overlay: AppConfig) -> AppConfig {
        AppConfig {
            runtime: overlay.runtime,
            flags: {
                let mut enabled = base.flags.enabled;
                for flag in overlay.flags.enabled {
                    if !enabled.contains(&flag) {
                        enabled.push(flag);
                    }
                }
                FlagsConfig { enabled }
            },
            gsuite: overlay.gsuite,
        }
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// 1. Loads base configuration from file
    /// 2. Overlays environment variables with the given prefix
    pub fn from_file_with_env(path: &Path, env_prefix: &str) -> Result<AppConfig> {
        let file_config = Self::from_file(path)?;

        // Try to load env overrides, but don't fail if there are none
        match Self::from_env_with_prefix(env_prefix) {
            Ok(env_config) => Ok(Self::merge(file_config, env_config)),
            Err(_) => Ok(file_config), // No env vars set, just use file config
        }
    }

    /// Build configuration using the config crate's builder pattern
    ///
    /// This allows for more complex configuration scenarios with multiple sources
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder {
            builder: Config::builder(),
        }
    }
}

/// Builder for complex configuration loading scenarios
pub struct ConfigLoaderBuilder {
    builder: ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigLoaderBuilder {
    /// Add a configuration file source
    pub fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml, // Default to TOML
        };

        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env(mut self, prefix: &str) -> Self {
        self.builder = self
            .builder
            .add_source(Environment::with_prefix(prefix).separator("_"));
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<AppConfig> {
        let config = self.builder.build()?;
        config.try_deserialize().map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Environment as Env;
    use checkout_router_resolver::FeatureFlags;
    use std::io::Write;

    const TOML_FIXTURE: &str = r#"
        [runtime]
        environment = "staging"
        log_level = "debug"

        [flags]
        enabled = ["upsell/concierge-session"]

        [gsuite]
        eligible_countries = ["US", "CA"]
        user_country = "US"
    "#;

    #[test]
    fn test_load_from_toml() {
        let config = ConfigLoader::from_toml(TOML_FIXTURE).unwrap();
        assert_eq!(config.runtime.environment, Env::Staging);
        assert_eq!(config.runtime.log_level, "debug");
        assert!(config.flags.is_enabled("upsell/concierge-session"));
        assert_eq!(config.gsuite.user_country.as_deref(), Some("US"));
    }

    #[test]
    fn test_load_from_yaml() {
        let yaml = r#"
            runtime:
              environment: production
              log_level: warn
            flags:
              enabled:
                - upsell/concierge-session
            gsuite:
              eligible_countries: [US]
        "#;

        let config = ConfigLoader::from_yaml(yaml).unwrap();
        assert_eq!(config.runtime.environment, Env::Production);
        assert_eq!(config.runtime.log_level, "warn");
        assert!(config.flags.is_enabled("upsell/concierge-session"));
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "runtime": { "environment": "development", "log_level": "trace" },
            "flags": { "enabled": [] },
            "gsuite": { "eligible_countries": ["US"], "user_country": "CA" }
        }"#;

        let config = ConfigLoader::from_json(json).unwrap();
        assert_eq!(config.runtime.environment, Env::Development);
        assert!(!config.flags.is_enabled("upsell/concierge-session"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ConfigLoader::from_toml("[runtime]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.runtime.environment, Env::Development);
        assert!(config.flags.enabled.is_empty());
        assert!(!config.gsuite.eligible_countries.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_FIXTURE.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::from_file(file.path()).unwrap();
        assert_eq!(config.runtime.log_level, "debug");
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let mut file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        file.write_all(b"key=value").unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_merge_unions_flags() {
        let base = ConfigLoader::from_toml(TOML_FIXTURE).unwrap();
        let overlay = ConfigLoader::from_toml(
            r#"
            [flags]
            enabled = ["upsell/concierge-session", "signup/social-first"]
        "#,
        )
        .unwrap();

        let merged = ConfigLoader::merge(base, overlay);
        assert!(merged.flags.is_enabled("upsell/concierge-session"));
        assert!(merged.flags.is_enabled("signup/social-first"));
        assert_eq!(merged.flags.enabled.len(), 2);
    }
}

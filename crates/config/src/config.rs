//! Core configuration structures for checkout-router

use checkout_router_resolver::{FeatureFlags, GsuiteCountryCheck, NoSavedDestination, Resolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Runtime environment configuration
    pub runtime: RuntimeConfig,

    /// Feature flag configuration
    pub flags: FlagsConfig,

    /// G Suite upsell eligibility configuration
    pub gsuite: GsuiteConfig,
}

impl AppConfig {
    /// Build a resolver backed by this configuration.
    ///
    /// The signup destination cookie is a per-request capability and stays
    /// with the caller; the config only wires flags and eligibility.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(
            Arc::new(self.flags.clone()),
            Arc::new(self.gsuite.clone()),
            Arc::new(NoSavedDestination),
        )
    }
}

/// Runtime environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Environment type (production, staging, development)
    pub environment: Environment,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            log_level: default_log_level(),
        }
    }
}

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Staging,
    #[default]
    Development,
}

/// Feature flag configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagsConfig {
    /// Flags that are switched on, by name (e.g., "upsell/concierge-session")
    pub enabled: Vec<String>,
}

impl FeatureFlags for FlagsConfig {
    fn is_enabled(&self, flag: &str) -> bool {
        self.enabled.iter().any(|f| f == flag)
    }
}

/// G Suite upsell eligibility configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GsuiteConfig {
    /// ISO 3166-1 alpha-2 codes of countries where the upsell may be shown
    pub eligible_countries: Vec<String>,

    /// The current user's country code, when known
    pub user_country: Option<String>,
}

impl Default for GsuiteConfig {
    fn default() -> Self {
        Self {
            eligible_countries: default_gsuite_countries(),
            user_country: None,
        }
    }
}

impl GsuiteCountryCheck for GsuiteConfig {
    fn is_eligible_country(&self) -> bool {
        self.user_country
            .as_deref()
            .is_some_and(|country| self.eligible_countries.iter().any(|c| c == country))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_gsuite_countries() -> Vec<String> {
    ["US", "CA", "GB", "IE", "AU", "NZ"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

//! # Configuration Settings
//!
//! Defines the configuration structure for the smoke-test suite.
//!
//! Configuration is sourced from a JSON file whose path is given by the
//! `SMOKE_TEST_CONFIG` environment variable, then overridden field-by-field by
//! `SMOKE_*` environment variables, then validated.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Environment variable naming the JSON configuration file
pub const CONFIG_PATH_ENV: &str = "SMOKE_TEST_CONFIG";

/// Main suite configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SmokeConfig {
    /// Domain serving applications on the shared router pool
    #[validate(length(min = 1, message = "Apps domain cannot be empty"))]
    pub apps_domain: String,

    /// Isolation segment under test
    #[validate(nested)]
    pub isolation_segment: IsolationSegmentSettings,

    /// Operation time budgets
    #[validate(nested)]
    #[serde(default)]
    pub timeouts: TimeoutSettings,

    /// Run the isolation-segment scenarios at all; when false they are
    /// skipped, not failed
    #[serde(default)]
    pub enable_isolation_segment_tests: bool,

    /// Reuse a pre-provisioned organization instead of expecting a fresh one
    #[serde(default)]
    pub use_existing_organization: bool,

    /// Reuse a pre-provisioned space instead of expecting a fresh one
    #[serde(default)]
    pub use_existing_space: bool,

    /// Delete pushed applications after each scenario
    #[serde(default)]
    pub cleanup: bool,

    /// Organization name (required when `use_existing_organization` is set)
    #[serde(default)]
    pub organization: Option<String>,

    /// Space name (required when `use_existing_space` is set)
    #[serde(default)]
    pub space: Option<String>,

    /// Platform CLI settings
    #[validate(nested)]
    #[serde(default)]
    pub cli: CliSettings,

    /// Test application assets
    #[validate(nested)]
    #[serde(default)]
    pub app: AppAssets,

    /// Logging settings
    #[validate(nested)]
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl SmokeConfig {
    /// Load configuration from the file named by `SMOKE_TEST_CONFIG`, apply
    /// environment overrides, and validate.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).map_err(|_| {
            Error::config(format!("{} must point to a JSON configuration file", CONFIG_PATH_ENV))
        })?;
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON file without applying overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config_with_source(
                format!("failed to read configuration file {}", path.display()),
                Box::new(e),
            )
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::config_with_source(
                format!("failed to parse configuration file {}", path.display()),
                Box::new(e),
            )
        })?;
        Ok(config)
    }

    /// Apply `SMOKE_*` environment overrides on top of file values
    pub fn apply_env_overrides(&mut self) {
        override_string("SMOKE_APPS_DOMAIN", &mut self.apps_domain);
        override_string("SMOKE_ISOLATION_SEGMENT_NAME", &mut self.isolation_segment.name);
        override_string("SMOKE_ISOLATION_SEGMENT_DOMAIN", &mut self.isolation_segment.domain);
        override_string("SMOKE_ISOLATION_SEGMENT_SPACE", &mut self.isolation_segment.space);
        override_bool("SMOKE_ENABLE_ISOLATION_SEGMENT_TESTS", &mut self.enable_isolation_segment_tests);
        override_bool("SMOKE_USE_EXISTING_ORGANIZATION", &mut self.use_existing_organization);
        override_bool("SMOKE_USE_EXISTING_SPACE", &mut self.use_existing_space);
        override_bool("SMOKE_CLEANUP", &mut self.cleanup);
        override_opt_string("SMOKE_ORGANIZATION", &mut self.organization);
        override_opt_string("SMOKE_SPACE", &mut self.space);
        override_string("SMOKE_CLI_BINARY", &mut self.cli.binary);
        override_opt_string("SMOKE_CLI_API_PATH_PREFIX", &mut self.cli.api_path_prefix);
        override_u64("SMOKE_DEFAULT_TIMEOUT_SECS", &mut self.timeouts.default_secs);
        override_u64("SMOKE_PUSH_TIMEOUT_SECS", &mut self.timeouts.push_secs);
        override_string("SMOKE_LOG_LEVEL", &mut self.observability.log_level);
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    /// Cross-field rules the validator derive cannot express
    fn validate_custom(&self) -> Result<()> {
        if self.use_existing_organization && self.organization.as_deref().unwrap_or("").is_empty() {
            return Err(Error::validation_field(
                "organization name is required when use_existing_organization is set",
                "organization",
            ));
        }
        if self.use_existing_space && self.space.as_deref().unwrap_or("").is_empty() {
            return Err(Error::validation_field(
                "space name is required when use_existing_space is set",
                "space",
            ));
        }
        if self.isolation_segment.domain == self.apps_domain {
            return Err(Error::validation(
                "isolation segment domain and apps domain cannot be the same",
            ));
        }
        Ok(())
    }
}

/// Isolation segment under test: its administrative name, the domain whose DNS
/// resolution reaches its dedicated router pool, and the space bound to it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IsolationSegmentSettings {
    /// Administrative segment name
    #[validate(length(min = 1, message = "Isolation segment name cannot be empty"))]
    pub name: String,

    /// Domain routed by the segment's dedicated router pool
    #[validate(length(min = 1, message = "Isolation segment domain cannot be empty"))]
    pub domain: String,

    /// Space assigned to the segment (when reusing a pre-provisioned space)
    #[serde(default)]
    pub space: String,
}

/// Operation time budgets in seconds
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TimeoutSettings {
    /// Budget for CLI/API operations and probes
    #[validate(range(min = 1, max = 600, message = "Default timeout must be 1-600 seconds"))]
    pub default_secs: u64,

    /// Budget for application pushes (staging included)
    #[validate(range(min = 1, max = 3600, message = "Push timeout must be 1-3600 seconds"))]
    pub push_secs: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self { default_secs: 30, push_secs: 120 }
    }
}

impl TimeoutSettings {
    /// Default operation timeout as Duration
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_secs)
    }

    /// Push timeout as Duration
    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push_secs)
    }
}

/// Platform CLI settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CliSettings {
    /// Name or path of the platform CLI binary
    #[validate(length(min = 1, message = "CLI binary cannot be empty"))]
    pub binary: String,

    /// Optional prefix prepended to admin API paths passed to `curl`, for
    /// platforms that front the API behind a path-routed gateway
    #[serde(default)]
    pub api_path_prefix: Option<String>,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self { binary: "cf".to_string(), api_path_prefix: None }
    }
}

/// Test application assets pushed during scenarios
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppAssets {
    /// Path to the prebuilt application bits
    #[validate(length(min = 1, message = "App bits path cannot be empty"))]
    pub bits_path: String,

    /// Buildpack used for the push
    #[validate(length(min = 1, message = "Buildpack cannot be empty"))]
    pub buildpack: String,

    /// Start command for the pushed application
    #[validate(length(min = 1, message = "Start command cannot be empty"))]
    pub start_command: String,

    /// Marker string a healthy application response must contain
    #[validate(length(min = 1, message = "Expected body marker cannot be empty"))]
    pub expected_body: String,
}

impl Default for AppAssets {
    fn default() -> Self {
        Self {
            bits_path: "assets/binary".to_string(),
            buildpack: "binary_buildpack".to_string(),
            start_command: "./app".to_string(),
            expected_body: "Hello from a binary".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level fallback when RUST_LOG is unset
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit JSON-formatted logs
    pub json_logs: bool,

    /// Service name recorded on log lines
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "routesmoke".to_string(),
        }
    }
}

fn override_string(var: &str, target: &mut String) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *target = value;
        }
    }
}

fn override_opt_string(var: &str, target: &mut Option<String>) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *target = Some(value);
        }
    }
}

fn override_bool(var: &str, target: &mut bool) {
    if let Ok(value) = std::env::var(var) {
        if let Ok(parsed) = value.parse() {
            *target = parsed;
        }
    }
}

fn override_u64(var: &str, target: &mut u64) {
    if let Ok(value) = std::env::var(var) {
        if let Ok(parsed) = value.parse() {
            *target = parsed;
        }
    }
}

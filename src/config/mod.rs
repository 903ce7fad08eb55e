//! # Configuration Management
//!
//! Suite configuration: a JSON file named by the `SMOKE_TEST_CONFIG` environment
//! variable, with per-field environment overrides and validation.

mod settings;

pub use settings::{
    AppAssets, CliSettings, IsolationSegmentSettings, ObservabilityConfig, SmokeConfig,
    TimeoutSettings, CONFIG_PATH_ENV,
};

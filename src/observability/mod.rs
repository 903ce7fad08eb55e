//! # Observability Infrastructure
//!
//! Structured logging for the smoke-test suite. A test run produces a linear
//! narrative of provisioning, pushes, and probes; `tracing` carries that
//! narrative with enough structure to diagnose a failed assertion afterwards.

pub mod logging;

pub use logging::init_logging;

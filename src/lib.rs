//! # Routesmoke
//!
//! Smoke-test suite verifying request routing across shared and
//! isolation-segment router pools. An isolation segment is a named pool of
//! routing infrastructure dedicated to specific organizations/spaces; the
//! suite pushes trivial applications into differently assigned spaces and
//! proves that each router pool serves exactly the applications it should.
//!
//! ## Architecture
//!
//! ```text
//! Scenario (tests/)  →  Workflow helpers  →  Platform CLI / Admin API
//!          ↓
//!    Routing Prober  →  router pool (shared or isolated)
//! ```
//!
//! The one piece of real mechanism is the [`probe::RoutingProber`]: it opens
//! the HTTP connection against the address resolved from a chosen router
//! domain while presenting the application's real hostname in the Host
//! header. Same hostname, different router — the response status is the
//! routing-isolation verdict.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use routesmoke::{probe::{RouterTarget, RoutingProber}, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let prober = RoutingProber::new();
//!     let router = RouterTarget::new("apps.example.com");
//!     let (status, body) =
//!         prober.probe_for_status("myapp.apps.example.com", &router).await?;
//!     println!("{} {}", status, body);
//!     Ok(())
//! }
//! ```

pub mod cli_app;
pub mod config;
pub mod errors;
pub mod observability;
pub mod platform;
pub mod probe;
pub mod timeout;
pub mod workflow;

// Re-export commonly used types
pub use config::SmokeConfig;
pub use errors::{Error, Result};
pub use observability::init_logging;
pub use probe::{RouterTarget, RoutingProber};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

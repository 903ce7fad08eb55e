//! # Platform Collaborators
//!
//! The two external surfaces the suite drives: the platform CLI (application
//! pushes, space targeting, deletes, raw API calls) and the typed admin API
//! built on top of the CLI's authenticated `curl` subcommand.

pub mod api;
pub mod cli;

pub use api::{ApiTransport, PlatformApi};
pub use cli::{CliOutput, PlatformCli};

//! # Command Line Interface
//!
//! Operator tooling around the suite: a configuration/environment preflight
//! and a one-shot manual probe for debugging routing by hand.

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::SmokeConfig;
use crate::platform::{PlatformApi, PlatformCli};
use crate::probe::{RouterTarget, RoutingProber};
use crate::workflow::verify_existing_environment;

#[derive(Parser)]
#[command(name = "routesmoke")]
#[command(about = "Routing isolation smoke-test tooling")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate configuration and platform preconditions without running tests
    Check,

    /// Send one probe: connect to a router pool while claiming a hostname
    Probe {
        /// Target hostname presented in the Host header
        #[arg(long)]
        host: String,

        /// Router domain used for address resolution
        #[arg(long)]
        router: String,

        /// Router port
        #[arg(long, default_value_t = 80)]
        port: u16,
    },
}

/// Run CLI commands
pub async fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check => run_check().await,
        Commands::Probe { host, router, port } => run_probe(&host, &router, port).await,
    }
}

/// Preflight: config loads and validates, the CLI binary resolves, and a
/// pre-existing environment (when configured) is entitled and assigned.
async fn run_check() -> anyhow::Result<()> {
    let config = SmokeConfig::load()?;
    info!(
        apps_domain = %config.apps_domain,
        isolation_segment = %config.isolation_segment.name,
        isolation_segment_domain = %config.isolation_segment.domain,
        "Configuration valid"
    );

    let cli = PlatformCli::from_config(&config);
    if !cli.is_available() {
        anyhow::bail!("platform CLI `{}` not found on PATH", cli.binary().display());
    }
    info!(binary = %cli.binary().display(), "Platform CLI available");

    if config.use_existing_organization && config.use_existing_space {
        let org_name = config.organization.clone().unwrap_or_default();
        let api = PlatformApi::new(cli);
        let org_guid = api.org_guid(&org_name).await?;
        verify_existing_environment(&api, &config, &org_name, &org_guid).await?;
        info!(org = %org_name, "Pre-existing environment entitled and assigned");
    }

    println!("preflight ok");
    Ok(())
}

async fn run_probe(host: &str, router_domain: &str, port: u16) -> anyhow::Result<()> {
    let prober = RoutingProber::new();
    let router = RouterTarget::new(router_domain).with_port(port);

    let (status, body) = prober.probe_for_status(host, &router).await?;
    println!("{}", status);
    if !body.is_empty() {
        println!("{}", body);
    }
    Ok(())
}

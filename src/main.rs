use clap::Parser;
use tracing::info;
use uuid::Uuid;

use routesmoke::cli_app::{run_cli, Cli};
use routesmoke::config::ObservabilityConfig;
use routesmoke::{init_logging, APP_NAME, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::default();
    if cli.verbose {
        observability.log_level = "debug".to_string();
    }
    init_logging(&observability)?;

    info!(
        app_name = APP_NAME,
        version = VERSION,
        run_id = %Uuid::new_v4(),
        "Starting routing isolation tooling"
    );

    run_cli(cli).await
}

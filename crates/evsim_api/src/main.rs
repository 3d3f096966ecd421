use anyhow::Context;
use clap::Parser;
use evsim_api::create_app;
use evsim_engine::{Simulator, SimulatorConfig};
use std::path::PathBuf;

/// Command line arguments for the evsim server
#[derive(Parser, Debug)]
#[command(name = "evsim")]
#[command(about = "EV charging session simulator")]
struct Args {
    /// Path to a simulator configuration JSON file, defaults are used without it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt().pretty().init();

    let config = match &args.config {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            let config = SimulatorConfig::from_json(&content)
                .with_context(|| format!("Failed to load config file '{}'", path.display()))?;
            tracing::info!(
                "Loaded config from {}: vehicle {}",
                path.display(),
                config.vehicle.name
            );
            config
        }
        None => {
            tracing::info!("No config file given, using the default vehicle");
            SimulatorConfig::default()
        }
    };

    let simulator = Simulator::new(config).context("Invalid simulator configuration")?;
    let app = create_app(simulator);

    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

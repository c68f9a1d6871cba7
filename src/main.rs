use clap::Parser;
use federated_search::config::GatewayConfig;
use federated_search::gateway::GatewayService;
use federated_search::transport::HttpTransport;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Region-federated search gateway
#[derive(Parser, Debug)]
#[command(name = "federated-search")]
#[command(version)]
struct Cli {
    /// TOML config file; the built-in three-region topology is used when omitted
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides the config file
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    // 1. Configuration:
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            GatewayConfig::from_toml_file(path)?
        }
        None => {
            tracing::warn!("No config file given, using the default local topology");
            GatewayConfig::default()
        }
    };
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    // 2. Registry, dispatch and heartbeat:
    let transport = Arc::new(HttpTransport::new());
    let service = GatewayService::new(&config, transport)?;
    service.log_topology();

    let monitor = service.start_monitor();

    // 3. HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Gateway listening on http://{}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, service.router())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await?;

    // 4. Shutdown:
    monitor.stop().await;
    tracing::info!("Gateway stopped");

    Ok(())
}

use clap::Parser;
use federated_search::worker::{Dataset, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Worker node serving `/health` and `/search` over an in-memory dataset
#[derive(Parser, Debug)]
#[command(name = "worker-node")]
struct Cli {
    /// Bind address
    #[arg(short, long, env = "WORKER_BIND", default_value = "127.0.0.1:3001")]
    bind: SocketAddr,

    /// Dataset as a JSON array of strings
    #[arg(short, long, env = "DATASET", default_value = "[]")]
    dataset: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let dataset = Dataset::from_json(&cli.dataset)?;
    tracing::info!("Worker node started with {} items", dataset.len());

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    tracing::info!("Worker node running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(dataset))).await?;

    Ok(())
}

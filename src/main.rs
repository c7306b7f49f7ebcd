use clap::Parser;
use tracing_subscriber::EnvFilter;

use session_gateway::{
    config::{AppConfig, Args},
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing OPENAI_API_KEY fails here, before any socket is bound.
    let args = Args::parse();
    let config = AppConfig::from(args);

    server::serve(config).await
}

use anyhow::Result;
use axum::Router;
use clap::Parser;
use phrase_core::{SearchSettings, VectorizerConfig};
use phrase_ingest::FailurePolicy;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Default number of results when a query does not set `k`
    #[arg(long, default_value_t = 10)]
    num_results: usize,
    /// Default minimum score when a query does not set `threshold`
    #[arg(long, default_value_t = 0.15)]
    threshold: f64,
    /// Vocabulary cap for the TF-IDF model
    #[arg(long, default_value_t = 15_000)]
    max_features: usize,
    /// Web fetch timeout in seconds
    #[arg(long, default_value_t = phrase_ingest::DEFAULT_TIMEOUT_SECS)]
    fetch_timeout_secs: u64,
    /// Only log failed ingestion instead of returning it to clients
    #[arg(long, default_value_t = false)]
    suppress_ingest_errors: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        defaults: SearchSettings {
            num_results: args.num_results,
            threshold: args.threshold,
            vectorizer: VectorizerConfig { max_features: args.max_features, ..VectorizerConfig::default() },
        },
        failure_policy: if args.suppress_ingest_errors { FailurePolicy::Suppress } else { FailurePolicy::Surface },
        fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

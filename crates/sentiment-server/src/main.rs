//! sentiment-server binary
//!
//! Loads the configured model and prediction log, then serves the REST API
//! until Ctrl+C or SIGTERM.

use clap::Parser;
use sentiment_core::config::ConfigLoader;
use sentiment_server::{shutdown_signal, SentimentServer};
use std::path::PathBuf;

/// Command line arguments for the sentiment API server.
#[derive(Parser, Debug)]
#[command(name = "sentiment-server")]
#[command(about = "REST API for IMDB review sentiment with prediction logging and drift monitoring")]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "sentiment.yaml")]
    config: PathBuf,

    /// Server bind address (overrides the configuration file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Model artifact directory (overrides the configuration file)
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Start even if the model cannot be loaded; /predict answers 503
    #[arg(long)]
    allow_missing_model: bool,

    /// Log level (defaults to the configured level)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ConfigLoader::load_or_default(&args.config).await?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(dir) = args.model_dir {
        config.model.dir = dir;
    }

    // Initialize logging
    let level = args
        .log_level
        .unwrap_or_else(|| config.logging.level.clone());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&level)).init();

    log::info!("Starting sentiment API...");
    log::info!("Configuration:");
    log::info!("  Bind address: {}", config.server.bind_addr);
    log::info!("  Model directory: {}", config.model.dir.display());
    log::info!("  Prediction log: {}", config.storage.database_path.display());
    log::info!("  Drift reference: {}", config.drift.reference_path.display());
    log::info!("  CORS enabled: {}", config.server.enable_cors);

    let server = SentimentServer::from_config(&config, !args.allow_missing_model)?;

    // Start server with graceful shutdown
    server.serve_with_shutdown(shutdown_signal()).await?;

    Ok(())
}

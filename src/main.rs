use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweet_gate::{
    args::Args,
    config::Config,
    errors::{AppError, AppResult},
    http_server::{self, AppState},
    metrics::Metrics,
    services::scraper::ScraperClient,
    user_store::UserStore,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    // Load configuration from --config path (defaults to config/default.toml)
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Initialize logging
    init_logging(&config.logging.level)?;

    info!("🚀 Starting TweetGate v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", args.config);
    info!("Provider base URL: {}", config.provider.base_url);

    // Load the user store
    let store = Arc::new(UserStore::load(&config.data.users_path).await?);
    info!(
        "Loaded {} users from {}",
        store.user_count().await,
        config.data.users_path
    );

    // One provider client for the whole process; requests share its
    // connection pool and rate-limit snapshot.
    let provider = Arc::new(ScraperClient::new(&config.provider));

    let server_address = config.get_server_address();
    let state = AppState {
        store,
        provider,
        config: Arc::new(config),
        metrics: Arc::new(Metrics::new()),
    };

    info!("🎯 TweetGate is now running!");
    info!("HTTP API available at: http://{}", server_address);

    http_server::start_server(state, &server_address)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

fn init_logging(level: &str) -> AppResult<()> {
    let log_level = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => {
            eprintln!("Invalid log level: {}, defaulting to info", level);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tweet_gate={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    Ok(())
}

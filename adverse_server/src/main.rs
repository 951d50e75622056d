//! Adverse Event Server - Main entry point

use adverse_core::{Settings, SharedEngine};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "adverse-server")]
#[command(about = "Adverse event learning server")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "ADVERSE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// TOML settings file
    #[arg(short, long, env = "ADVERSE_CONFIG")]
    config: Option<PathBuf>,

    /// Location of the persisted graph (overrides the settings file)
    #[arg(long, env = "ADVERSE_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Comma separated list of allowed CORS origins, `*` for any
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',', default_value = "*")]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,adverse_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(path) = cli.data_path {
        settings.storage.path = path;
    }

    let engine = settings.open_engine();
    let config = engine.config();
    info!(
        fire_threshold = config.fire_threshold,
        initial_pattern_weight = config.initial_pattern_weight,
        reinforcement_step = config.reinforcement_step,
        max_weight = config.max_weight,
        "engine ready"
    );
    let engine = SharedEngine::new(engine);

    adverse_server::start_server(engine, &cli.host, cli.port, &cli.allowed_origins).await
}

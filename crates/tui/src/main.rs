mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::{Arc, Mutex},
};

use game_reviews_core::{
    config::{self, AppConfig, Backend},
    GameController, GameService, GameStore, MemoryStore,
};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let store: Arc<dyn GameStore> = match config.backend {
        Backend::Remote => Arc::new(GameService::new(&config)),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };
    let source = match config.backend {
        Backend::Remote => config.collection_url(),
        Backend::Memory => "in-memory store".to_string(),
    };
    tracing::info!(%source, backend = ?config.backend, "Starting game-reviews");

    let controller = GameController::from_store(store);
    let mut app = app::GameReviewsApp::new(controller, source);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("game-reviews.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal UI owns stdout, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}

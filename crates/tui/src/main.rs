mod app;
mod score_font;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use gamerack_core::{
    config::{self, AppConfig},
    Library,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let library = if config.seed_samples {
        Library::with_samples(&config.placeholder_image)
    } else {
        Library::new(&config.placeholder_image)
    };
    info!(games = library.games().len(), "Library initialised");

    let mut app = app::GameRackApp::new(&config, library);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("gamerack.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}

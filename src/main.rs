use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use moscow_art_bot::assets::FsProbe;
use moscow_art_bot::bot::{callback_handler, message_handler};
use moscow_art_bot::catalog::Catalog;
use moscow_art_bot::config::{BotConfig, LogFormat};
use moscow_art_bot::localization::LocalizationManager;
use moscow_art_bot::router::Router;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().context("Failed to read bot configuration")?;

    init_tracing(config.log_format);

    info!(config = ?config, "Starting Moscow art guide bot");

    // Content is immutable from here on and shared by every handler
    let catalog = Catalog::builtin(config.images_dir.clone())
        .context("Failed to load the content catalog")?;
    if !catalog.images_root().is_dir() {
        warn!(
            images_root = %catalog.images_root().display(),
            "Image directory not found, screens will be sent as text only"
        );
    }
    let messages = LocalizationManager::new().context("Failed to load interface strings")?;
    let router = Arc::new(Router::new(
        Arc::new(catalog),
        Arc::new(FsProbe),
        Arc::new(messages),
    ));
    let config = Arc::new(config);

    let bot = Bot::new(config.token.clone());

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");

    Ok(())
}

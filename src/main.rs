use clap::Parser;
use color_eyre::eyre::Result;
use futures_util::future::join_all;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use inkdex::infrastructure::{AppConfig, CliArgs, StorageManager, build_image_loader};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_env();
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = inkdex::VERSION, backend = %config.backend, "Starting inkdex");

    let loader = build_image_loader(&config).await?;
    let options = loader.config().options;

    let resolved = join_all(
        args.urls
            .iter()
            .map(|url| loader.resolve_detailed(url, &options)),
    )
    .await;

    for image in &resolved {
        println!("{} -> {} ({})", image.original_url, image.url, image.source);
    }

    let fallbacks = resolved
        .iter()
        .filter(|image| image.source.is_fallback())
        .count();
    if fallbacks > 0 {
        warn!(fallbacks, total = resolved.len(), "Some images fell back to the placeholder");
    }

    info!(stats = %loader.memory_cache().stats(), "Finished");

    Ok(())
}

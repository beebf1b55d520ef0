use super::app_config::{BackendKind, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "inkdex",
    version,
    about = "Resolve remote artist images into cached, self-hosted copies",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Storage backend.
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Per-attempt timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Maximum fetch attempts.
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Backoff base delay in milliseconds.
    #[arg(long, value_name = "MS")]
    pub initial_delay_ms: Option<u64>,

    /// Image URLs to resolve.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,
}

//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::infrastructure::image::ImageLoaderConfig;
use crate::infrastructure::supabase::DEFAULT_BUCKET;

pub(crate) const APP_NAME: &str = "inkdex";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "inkdex";

/// Environment variable overriding the Supabase project URL.
pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
/// Environment variable overriding the Supabase API key.
pub const SUPABASE_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Which collaborators back the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Files under a local directory.
    #[default]
    Local,
    /// A Supabase project.
    Supabase,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Supabase => write!(f, "supabase"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Selected backend.
    #[serde(default)]
    pub backend: BackendKind,

    /// Loader tuning.
    #[serde(default)]
    pub loader: ImageLoaderConfig,

    /// Local backend settings.
    #[serde(default)]
    pub local: LocalConfig,

    /// Supabase backend settings.
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

/// Local filesystem backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory holding stored objects. Defaults to the data directory.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,

    /// Base URL objects are served from. Defaults to a `file://` URL of `root_dir`.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Cache store file. Defaults to `image_cache.json` in `root_dir`.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,

    /// Error log file. Defaults to `error_logs.jsonl` in `root_dir`.
    #[serde(default)]
    pub error_log_file: Option<PathBuf>,
}

impl LocalConfig {
    /// Returns effective object root.
    #[must_use]
    pub fn effective_root_dir(&self) -> PathBuf {
        self.root_dir.clone().unwrap_or_else(default_storage_dir)
    }

    /// Returns effective public base URL.
    #[must_use]
    pub fn effective_public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("file://{}", self.effective_root_dir().display()))
    }

    /// Returns effective cache store file.
    #[must_use]
    pub fn effective_cache_file(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| self.effective_root_dir().join("image_cache.json"))
    }

    /// Returns effective error log file.
    #[must_use]
    pub fn effective_error_log_file(&self) -> PathBuf {
        self.error_log_file
            .clone()
            .unwrap_or_else(|| self.effective_root_dir().join("error_logs.jsonl"))
    }
}

/// Supabase backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// Anon or service key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Bucket holding migrated images.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            bucket: default_bucket(),
        }
    }
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_storage_dir() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
        || std::env::temp_dir().join(APP_NAME).join("storage"),
        |dirs| dirs.data_dir().join("storage"),
    )
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(backend) = args.backend {
            self.backend = backend;
        }
        let options = &mut self.loader.options;
        if let Some(timeout_ms) = args.timeout_ms {
            *options = options.with_timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(max_retries) = args.max_retries {
            *options = options.with_max_retries(max_retries);
        }
        if let Some(initial_delay_ms) = args.initial_delay_ms {
            *options = options.with_initial_delay(Duration::from_millis(initial_delay_ms));
        }
    }

    /// Applies Supabase credentials found in the environment.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(|name| std::env::var(name).ok());
    }

    fn merge_with_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(SUPABASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.supabase.url = Some(url);
        }
        if let Some(key) = var(SUPABASE_KEY_ENV).filter(|v| !v.is_empty()) {
            self.supabase.api_key = Some(key);
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            backend: BackendKind::default(),
            loader: ImageLoaderConfig::default(),
            local: LocalConfig::default(),
            supabase: SupabaseConfig::default(),
        }
    }
}

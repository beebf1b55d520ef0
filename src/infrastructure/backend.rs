//! Wires an [`ImageLoader`] to the configured backend.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{CacheStorePort, ErrorLogPort, ObjectStoragePort};
use crate::infrastructure::config::{AppConfig, BackendKind, ConfigError};
use crate::infrastructure::image::{HttpImageFetcher, ImageLoader};
use crate::infrastructure::local::{FileCacheStore, JsonLinesErrorLog, LocalObjectStorage};
use crate::infrastructure::supabase::{
    SupabaseCacheStore, SupabaseClient, SupabaseErrorLog, SupabaseObjectStorage,
};

struct Collaborators {
    cache_store: Arc<dyn CacheStorePort>,
    object_storage: Arc<dyn ObjectStoragePort>,
    error_log: Arc<dyn ErrorLogPort>,
}

/// Builds a loader backed by the collaborators `config` selects.
///
/// # Errors
///
/// Returns `ConfigError` if a required setting is missing or a backend
/// cannot be opened.
pub async fn build_image_loader(config: &AppConfig) -> Result<ImageLoader, ConfigError> {
    let collaborators = match config.backend {
        BackendKind::Local => local_collaborators(config).await?,
        BackendKind::Supabase => supabase_collaborators(config)?,
    };
    let fetcher = Arc::new(HttpImageFetcher::new(&config.loader.client_context)?);

    info!(backend = %config.backend, "Image loader ready");

    Ok(ImageLoader::new(
        config.loader.clone(),
        fetcher,
        collaborators.cache_store,
        collaborators.object_storage,
        collaborators.error_log,
    ))
}

async fn local_collaborators(config: &AppConfig) -> Result<Collaborators, ConfigError> {
    let local = &config.local;
    let root = local.effective_root_dir();
    tokio::fs::create_dir_all(&root).await?;

    let cache_store = FileCacheStore::open(local.effective_cache_file()).await?;
    Ok(Collaborators {
        cache_store: Arc::new(cache_store),
        object_storage: Arc::new(LocalObjectStorage::new(
            root,
            local.effective_public_base_url(),
        )),
        error_log: Arc::new(JsonLinesErrorLog::new(local.effective_error_log_file())),
    })
}

fn supabase_collaborators(config: &AppConfig) -> Result<Collaborators, ConfigError> {
    let supabase = &config.supabase;
    let url = supabase
        .url
        .as_deref()
        .ok_or(ConfigError::MissingSetting("supabase.url"))?;
    let api_key = supabase
        .api_key
        .as_deref()
        .ok_or(ConfigError::MissingSetting("supabase.api_key"))?;

    let client = SupabaseClient::new(url, api_key)?;
    Ok(Collaborators {
        cache_store: Arc::new(SupabaseCacheStore::new(client.clone())),
        object_storage: Arc::new(SupabaseObjectStorage::new(
            client.clone(),
            supabase.bucket.clone(),
        )),
        error_log: Arc::new(SupabaseErrorLog::new(client)),
    })
}

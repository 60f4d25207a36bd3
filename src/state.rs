use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::auth::{ApiKeyValidator, HttpApiKeyValidator, HttpSessionValidator, SessionValidator};
use crate::config::{AppConfig, StoreBackend};
use crate::services::ProductService;
use crate::store::{DocumentStore, HttpDocumentStore, MemoryDocumentStore};

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub store: Arc<dyn DocumentStore>,
    pub api_keys: Arc<dyn ApiKeyValidator>,
    pub sessions: Arc<dyn SessionValidator>,
    pub write_permission: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        api_keys: Arc<dyn ApiKeyValidator>,
        sessions: Arc<dyn SessionValidator>,
        config: &AppConfig,
    ) -> Self {
        let products = ProductService::new(store.clone(), config.store.collection.clone(), config.query.max_limit);
        Self {
            products,
            store,
            api_keys,
            sessions,
            write_permission: Arc::from(config.auth.write_permission.as_str()),
        }
    }

    /// Wire the configured adapters
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.store.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory document store; data is not persisted");
                Arc::new(MemoryDocumentStore::new())
            }
            StoreBackend::Http => {
                let base = config
                    .store
                    .base_url
                    .as_deref()
                    .context("STORE_BASE_URL is required when STORE_BACKEND=http")?;
                let timeout = Duration::from_secs(config.store.timeout_secs);
                Arc::new(HttpDocumentStore::new(base, timeout).context("invalid STORE_BASE_URL")?)
            }
        };

        let timeout = Duration::from_secs(config.auth.timeout_secs);
        let api_key_url = config
            .auth
            .api_key_service_url
            .as_deref()
            .context("API_KEY_SERVICE_URL is required")?;
        let session_url = config
            .auth
            .session_service_url
            .as_deref()
            .context("SESSION_SERVICE_URL is required")?;

        let api_keys = HttpApiKeyValidator::new(api_key_url, timeout).context("invalid API_KEY_SERVICE_URL")?;
        let sessions = HttpSessionValidator::new(session_url, timeout).context("invalid SESSION_SERVICE_URL")?;

        Ok(Self::new(store, Arc::new(api_keys), Arc::new(sessions), config))
    }
}

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

use catalog_api::auth::{ApiKeyInfo, ApiKeyValidator, AuthError, SessionInfo, SessionValidator};
use catalog_api::store::MemoryDocumentStore;
use catalog_api::{app, config, AppState};

pub const ACME_KEY: &str = "acme-key";
pub const OTHER_KEY: &str = "other-key";
pub const MULTI_KEY: &str = "multi-key";
pub const READONLY_KEY: &str = "readonly-key";
pub const INACTIVE_KEY: &str = "inactive-key";
pub const OUTAGE_KEY: &str = "outage-key";

pub const ACME_SESSION: &str = "sess-acme";
pub const EXPIRED_SESSION: &str = "sess-expired";
pub const OUTAGE_SESSION: &str = "sess-outage";

/// API-key service double
pub struct StaticApiKeys {
    keys: HashMap<String, ApiKeyInfo>,
}

impl StaticApiKeys {
    pub fn standard() -> Self {
        let key = |id: &str, active: bool, permissions: &[&str], subdomains: &[&str]| ApiKeyInfo {
            key_id: id.to_string(),
            active,
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
            allowed_subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
        };

        let keys = HashMap::from([
            (ACME_KEY.to_string(), key("k-acme", true, &["write:products"], &["acme"])),
            (OTHER_KEY.to_string(), key("k-other", true, &["write:products"], &["other"])),
            (MULTI_KEY.to_string(), key("k-multi", true, &["write:products"], &["acme", "other"])),
            (READONLY_KEY.to_string(), key("k-ro", true, &["read:products"], &["acme"])),
            (INACTIVE_KEY.to_string(), key("k-off", false, &["write:products"], &["acme"])),
        ]);
        Self { keys }
    }
}

#[async_trait]
impl ApiKeyValidator for StaticApiKeys {
    async fn validate(&self, api_key: &str) -> Result<ApiKeyInfo, AuthError> {
        if api_key == OUTAGE_KEY {
            return Err(AuthError::Unavailable("connection refused".into()));
        }
        self.keys
            .get(api_key)
            .cloned()
            .ok_or_else(|| AuthError::Rejected("unknown key".into()))
    }
}

/// Session service double
pub struct StaticSessions;

#[async_trait]
impl SessionValidator for StaticSessions {
    async fn validate(&self, session_id: &str) -> Result<SessionInfo, AuthError> {
        match session_id {
            ACME_SESSION => Ok(SessionInfo {
                uid: "u-1".into(),
                active: true,
                claims: HashMap::from([("role".to_string(), json!("viewer"))]),
            }),
            EXPIRED_SESSION => Ok(SessionInfo {
                uid: "u-2".into(),
                active: false,
                claims: HashMap::new(),
            }),
            OUTAGE_SESSION => Err(AuthError::Unavailable("connection refused".into())),
            _ => Err(AuthError::Rejected("unknown session".into())),
        }
    }
}

/// Router bound to an ephemeral port with an in-memory store
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryDocumentStore>,
    pub client: Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState::new(
            store.clone(),
            Arc::new(StaticApiKeys::standard()),
            Arc::new(StaticSessions),
            config::config(),
        );
        let router = app(state, config::config());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            store,
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request carrying an API key
    pub fn write(&self, method: reqwest::Method, path: &str, api_key: &str) -> RequestBuilder {
        self.client.request(method, self.url(path)).header("X-API-KEY", api_key)
    }

    /// Request carrying a tenant header and no session
    pub fn read(&self, method: reqwest::Method, path: &str, subdomain: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("X-Client-Subdomain", subdomain)
    }

    /// Create a product through the API and return its `data`
    pub async fn create_product(&self, api_key: &str, body: Value) -> Result<Value> {
        let res = self
            .write(reqwest::Method::POST, "/api/v1/products", api_key)
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(res.status() == 201, "create failed with {}", res.status());
        let body = res.json::<Value>().await?;
        Ok(body["data"].clone())
    }
}

pub fn simple_product(subdomain: &str) -> Value {
    json!({
        "name": "Shirt",
        "sku": "SH1",
        "price": 10,
        "project_id": "p1",
        "subdomain": subdomain
    })
}

pub async fn json_body(res: Response) -> Result<Value> {
    Ok(res.json::<Value>().await?)
}

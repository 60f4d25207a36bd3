//! Credential validation collaborators.
//!
//! API keys guard the write routes and sessions the read routes. Both are
//! validated by sibling services; this module defines the contracts and the
//! HTTP clients for them.

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use http::{HttpApiKeyValidator, HttpSessionValidator};

/// What the API-key service knows about a key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyInfo {
    pub key_id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub allowed_subdomains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub uid: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub claims: HashMap<String, Value>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// The service answered and said no
    #[error("Credential rejected: {0}")]
    Rejected(String),

    /// The service could not be asked
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait ApiKeyValidator: Send + Sync {
    async fn validate(&self, api_key: &str) -> Result<ApiKeyInfo, AuthError>;
}

#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, session_id: &str) -> Result<SessionInfo, AuthError>;
}

/// Short, non-reversible identifier for a credential, safe to log
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    format!("{:x}", digest).chars().take(12).collect()
}

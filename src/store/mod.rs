//! Document store collaborator.
//!
//! Products live in a remote document database addressed by collection and
//! document ID. The service only needs get, create-with-id, partial update
//! and filtered query, so that is all the trait exposes.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::filter::{FilterError, QueryOptions};

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

/// Top-level document fields
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] FilterError),

    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store responded with {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError>;

    /// Fails with `AlreadyExists` if the ID is taken
    async fn create_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Shallow merge: listed fields are replaced, others are kept
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn query(&self, collection: &str, options: &QueryOptions) -> Result<Vec<Document>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Document, DocumentStore, Fields, StoreError};
use crate::filter::{Filter, QueryOptions};

/// In-process document store for local development and tests.
///
/// Documents within a collection iterate in ID order, which is what an
/// unordered query returns.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            })
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn create_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), fields);
        debug!("memory store: created {}/{}", collection, id);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        for (key, value) in fields {
            doc.insert(key, value);
        }
        debug!("memory store: updated {}/{}", collection, id);
        Ok(())
    }

    async fn query(&self, collection: &str, options: &QueryOptions) -> Result<Vec<Document>, StoreError> {
        let filter = Filter::new(options.clone())?;

        let snapshot: Vec<(String, Fields)> = {
            let collections = self.collections.read().await;
            collections
                .get(collection)
                .map(|docs| docs.iter().map(|(id, data)| (id.clone(), data.clone())).collect())
                .unwrap_or_default()
        };

        Ok(filter
            .apply(snapshot)
            .into_iter()
            .map(|(id, data)| Document { id, data })
            .collect())
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

use super::{Document, DocumentStore, Fields, StoreError};
use crate::filter::QueryOptions;

/// Client for the document database's JSON API.
///
/// Routes, relative to the base URL:
///
/// | call | request |
/// |---|---|
/// | get | `GET collections/{c}/documents/{id}` |
/// | create | `PUT collections/{c}/documents/{id}` |
/// | update | `PATCH collections/{c}/documents/{id}` |
/// | query | `POST collections/{c}/query` |
/// | health | `GET health` |
#[derive(Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: Url,
}

impl HttpDocumentStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`, a base URL always has path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn document_url(&self, collection: &str, id: &str) -> Url {
        self.endpoint(&["collections", collection, "documents", id])
    }

    async fn backend_error(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StoreError::Backend { status, message }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let response = self.client.get(self.document_url(collection, id)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(collection, id)),
            s if s.is_success() => Ok(response.json::<Document>().await?),
            _ => Err(Self::backend_error(response).await),
        }
    }

    async fn create_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.document_url(collection, id))
            .json(&fields)
            .send()
            .await?;
        match response.status() {
            StatusCode::CONFLICT => Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
            s if s.is_success() => {
                debug!("document store: created {}/{}", collection, id);
                Ok(())
            }
            _ => Err(Self::backend_error(response).await),
        }
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&fields)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(collection, id)),
            s if s.is_success() => {
                debug!("document store: updated {}/{}", collection, id);
                Ok(())
            }
            _ => Err(Self::backend_error(response).await),
        }
    }

    async fn query(&self, collection: &str, options: &QueryOptions) -> Result<Vec<Document>, StoreError> {
        let response = self
            .client
            .post(self.endpoint(&["collections", collection, "query"]))
            .json(options)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }
        Ok(response.json::<Vec<Document>>().await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let response = self.client.get(self.endpoint(&["health"])).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(response).await)
        }
    }
}

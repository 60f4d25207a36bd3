use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::error::ProductError;
use super::guard::{authorize, Action};
use super::patch::ProductPatch;
use super::query::scope_to_subdomain;
use super::validator::{derive_filter_price, validate_new_product};
use super::variations;
use crate::context::{ApiKeyContext, SessionContext};
use crate::filter::QueryOptions;
use crate::models::{NewProduct, NewVariation, Product, Variation, VariationPatch};
use crate::store::{DocumentStore, StoreError};

/// Result of a tenant-scoped listing
#[derive(Debug, Clone)]
pub struct ProductListing {
    /// The query as executed (or as received, when nothing was executed)
    pub query: QueryOptions,
    pub products: Vec<Product>,
}

/// Orchestrates validator, guard and store for the product routes.
///
/// Variation writes are read-modify-write of the whole product document;
/// concurrent edits of the same product are last-writer-wins.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn DocumentStore>,
    collection: String,
    max_limit: Option<usize>,
}

impl ProductService {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>, max_limit: Option<usize>) -> Self {
        Self {
            store,
            collection: collection.into(),
            max_limit,
        }
    }

    pub async fn create(&self, auth: Option<&ApiKeyContext>, input: NewProduct) -> Result<Product, ProductError> {
        let mut product = input.into_product(Utc::now());
        validate_new_product(&product)?;
        product.filter_price = derive_filter_price(&product);

        authorize(auth, &product.subdomain, Action::Create)?;

        let fields = product.to_fields().map_err(ProductError::Corrupt)?;
        self.store
            .create_with_id(&self.collection, &product.id, fields)
            .await?;

        info!(product_id = %product.id, subdomain = %product.subdomain, "product created");
        Ok(product)
    }

    /// Read by ID, restricted to the caller's resolved subdomain
    pub async fn get(&self, session: &SessionContext, id: &str) -> Result<Product, ProductError> {
        let subdomain = session.subdomain().ok_or_else(|| {
            ProductError::Permission("Access denied. Subdomain context is required.".to_string())
        })?;

        let product = self.load(id).await?;
        if product.subdomain != subdomain {
            return Err(ProductError::Permission(
                "You do not have permission to access this resource.".to_string(),
            ));
        }
        Ok(product)
    }

    /// Load a product and check the caller may modify it, using the stored
    /// subdomain as the target.
    pub async fn load_for_mutation(&self, auth: Option<&ApiKeyContext>, id: &str) -> Result<Product, ProductError> {
        let product = self.load(id).await?;
        authorize(auth, &product.subdomain, Action::Modify)?;
        Ok(product)
    }

    pub async fn update(&self, product: Product, patch: ProductPatch) -> Result<Product, ProductError> {
        let (updated, fields) = patch.apply(&product, Utc::now())?;
        self.store.update(&self.collection, &product.id, fields).await?;

        info!(product_id = %product.id, fields = patch.fields().len(), "product updated");
        Ok(updated)
    }

    /// Soft delete
    pub async fn deactivate(&self, mut product: Product) -> Result<Product, ProductError> {
        product.active = false;
        product.updated_at = Utc::now();

        let mut fields = crate::store::Fields::new();
        fields.insert("active".to_string(), Value::Bool(false));
        fields.insert(
            "updatedAt".to_string(),
            serde_json::to_value(product.updated_at).map_err(ProductError::Corrupt)?,
        );
        self.store.update(&self.collection, &product.id, fields).await?;

        info!(product_id = %product.id, "product deactivated");
        Ok(product)
    }

    pub async fn search(&self, session: &SessionContext, options: QueryOptions) -> Result<ProductListing, ProductError> {
        let Some(scoped) = scope_to_subdomain(options.clone(), session, self.max_limit) else {
            return Ok(ProductListing {
                query: options,
                products: Vec::new(),
            });
        };

        let docs = self.store.query(&self.collection, &scoped).await?;
        let mut products = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc.id.clone();
            match Product::from_document(doc) {
                Ok(product) => products.push(product),
                Err(e) => warn!(product_id = %id, "skipping undecodable product: {}", e),
            }
        }

        Ok(ProductListing {
            query: scoped,
            products,
        })
    }

    pub async fn create_variation(&self, mut product: Product, input: NewVariation) -> Result<Variation, ProductError> {
        let variation = variations::add_variation(&mut product, input, Utc::now())?;
        self.save(&product).await?;

        info!(product_id = %product.id, variation_id = %variation.id, sku = %variation.sku, "variation created");
        Ok(variation)
    }

    pub async fn update_variation(
        &self,
        mut product: Product,
        variation_id: &str,
        patch: VariationPatch,
    ) -> Result<Variation, ProductError> {
        let variation = variations::update_variation(&mut product, variation_id, &patch, Utc::now())?;
        self.save(&product).await?;

        info!(product_id = %product.id, variation_id = %variation.id, "variation updated");
        Ok(variation)
    }

    pub async fn deactivate_variation(&self, mut product: Product, variation_id: &str) -> Result<Variation, ProductError> {
        let variation = variations::deactivate_variation(&mut product, variation_id, Utc::now())?;
        self.save(&product).await?;

        info!(product_id = %product.id, variation_id = %variation.id, "variation deactivated");
        Ok(variation)
    }

    async fn load(&self, id: &str) -> Result<Product, ProductError> {
        let doc = self.store.get(&self.collection, id).await.map_err(|e| match e {
            StoreError::NotFound { .. } => ProductError::NotFound("Product"),
            other => ProductError::Store(other),
        })?;
        Product::from_document(doc).map_err(ProductError::Corrupt)
    }

    /// Whole-document write
    async fn save(&self, product: &Product) -> Result<(), ProductError> {
        let fields = product.to_fields().map_err(ProductError::Corrupt)?;
        self.store.update(&self.collection, &product.id, fields).await?;
        Ok(())
    }
}

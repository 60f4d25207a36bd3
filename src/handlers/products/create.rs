// handlers/products/create.rs - POST /api/v1/products handler

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};

use crate::context::ApiKeyContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/**
 * POST /api/v1/products - Create a product in the caller's subdomain
 *
 * Expected Input (simple product):
 * ```json
 * {
 *   "name": "Shirt",          // Required
 *   "project_id": "p1",       // Required
 *   "subdomain": "acme",      // Must be one of the key's allowed subdomains
 *   "sku": "SH1",             // Required without variations
 *   "price": 10               // Required without variations, > 0
 * }
 * ```
 *
 * A non-empty `variations` list makes it a variant-bearing product; each
 * entry then needs `sku` and `price > 0` and `filter_price` becomes the
 * cheapest variation.
 */
pub async fn product_create(
    State(state): State<AppState>,
    auth: Option<Extension<ApiKeyContext>>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(input) = body?;
    let auth = auth.map(|Extension(ctx)| ctx);

    let product = state.products.create(auth.as_ref(), input).await?;
    Ok(ApiResponse::created(product).with_message("Product created successfully"))
}

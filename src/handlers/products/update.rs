// handlers/products/update.rs - PATCH /api/v1/products/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use crate::context::ApiKeyContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Product;
use crate::services::ProductPatch;
use crate::state::AppState;

/**
 * PATCH /api/v1/products/:id - Partial update
 *
 * Only editable fields are applied. `id`, `createdAt`, `subdomain`,
 * `project_id` and `variations` are silently ignored, as are the
 * server-maintained `updatedAt` and `filter_price`.
 *
 * The product is loaded and the caller's subdomain checked before the body
 * is looked at.
 */
pub async fn product_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Option<Extension<ApiKeyContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Product> {
    let auth = auth.map(|Extension(ctx)| ctx);
    let product = state.products.load_for_mutation(auth.as_ref(), &id).await?;

    let Json(body) = body?;
    let patch = ProductPatch::from_json(body)?;

    let updated = state.products.update(product, patch).await?;
    Ok(ApiResponse::success(updated).with_message("Product updated successfully"))
}

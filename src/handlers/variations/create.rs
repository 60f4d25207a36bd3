use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::parse_body;
use crate::context::ApiKeyContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{NewVariation, Variation};
use crate::state::AppState;

/**
 * POST /api/v1/products/:id/variations - Append a variation
 *
 * Expected Input:
 * ```json
 * {
 *   "sku": "SH1-RED",                 // Required, unique within the product
 *   "price": 12,                      // Required, > 0
 *   "attributes": {"color": "red"},   // Required, non-empty
 *   "stock": 5,
 *   "imageUrl": "https://..."
 * }
 * ```
 *
 * Returns 409 if any variation of the product, active or not, already uses
 * the SKU.
 */
pub async fn variation_create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Option<Extension<ApiKeyContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Variation> {
    let auth = auth.map(|Extension(ctx)| ctx);
    let product = state.products.load_for_mutation(auth.as_ref(), &id).await?;

    let Json(body) = body?;
    let input: NewVariation = parse_body(body, "variation data")?;

    let variation = state.products.create_variation(product, input).await?;
    Ok(ApiResponse::created(variation).with_message("Variation added successfully"))
}

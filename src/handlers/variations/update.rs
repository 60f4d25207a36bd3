use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::parse_body;
use crate::context::ApiKeyContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Variation, VariationPatch};
use crate::state::AppState;

/// PATCH /api/v1/products/:id/variations/:variation_id - only `price`,
/// `stock` and `imageUrl` are applied
pub async fn variation_update(
    State(state): State<AppState>,
    Path((id, variation_id)): Path<(String, String)>,
    auth: Option<Extension<ApiKeyContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Variation> {
    let auth = auth.map(|Extension(ctx)| ctx);
    let product = state.products.load_for_mutation(auth.as_ref(), &id).await?;

    let Json(body) = body?;
    let patch: VariationPatch = parse_body(body, "variation update")?;

    let variation = state.products.update_variation(product, &variation_id, patch).await?;
    Ok(ApiResponse::success(variation).with_message("Variation updated successfully"))
}

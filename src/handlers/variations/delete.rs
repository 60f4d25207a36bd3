use axum::{
    extract::{Path, State},
    Extension,
};

use crate::context::ApiKeyContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Variation;
use crate::state::AppState;

/// DELETE /api/v1/products/:id/variations/:variation_id - soft delete in place
pub async fn variation_delete(
    State(state): State<AppState>,
    Path((id, variation_id)): Path<(String, String)>,
    auth: Option<Extension<ApiKeyContext>>,
) -> ApiResult<Variation> {
    let auth = auth.map(|Extension(ctx)| ctx);
    let product = state.products.load_for_mutation(auth.as_ref(), &id).await?;

    let variation = state.products.deactivate_variation(product, &variation_id).await?;
    Ok(ApiResponse::success(variation).with_message("Variation deactivated successfully"))
}

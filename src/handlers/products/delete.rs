// handlers/products/delete.rs - DELETE /api/v1/products/:id handler

use axum::{
    extract::{Path, State},
    Extension,
};

use crate::context::ApiKeyContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Product;
use crate::state::AppState;

/// DELETE /api/v1/products/:id - soft delete, the document is kept with `active = false`
pub async fn product_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Option<Extension<ApiKeyContext>>,
) -> ApiResult<Product> {
    let auth = auth.map(|Extension(ctx)| ctx);
    let product = state.products.load_for_mutation(auth.as_ref(), &id).await?;

    let product = state.products.deactivate(product).await?;
    Ok(ApiResponse::success(product).with_message("Product deactivated successfully"))
}

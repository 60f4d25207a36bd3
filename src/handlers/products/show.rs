// handlers/products/show.rs - GET /api/v1/products/:id handler

use axum::{
    extract::{Path, State},
    Extension,
};

use crate::context::SessionContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Product;
use crate::state::AppState;

/// GET /api/v1/products/:id - only visible from the product's own subdomain
pub async fn product_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Option<Extension<SessionContext>>,
) -> ApiResult<Product> {
    let session = session.map(|Extension(ctx)| ctx).unwrap_or_default();

    let product = state.products.get(&session, &id).await?;
    Ok(ApiResponse::success(product))
}

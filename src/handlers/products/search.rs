// handlers/products/search.rs - POST /api/v1/products/search handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::json;

use crate::context::SessionContext;
use crate::filter::QueryOptions;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Product;
use crate::state::AppState;

/**
 * POST /api/v1/products/search - Tenant-scoped listing
 *
 * Expected Input:
 * ```json
 * {
 *   "filters": [{"field": "category", "operator": "==", "value": "shirts"}],
 *   "orderBy": [{"field": "filter_price", "direction": "asc"}],
 *   "limit": 20,
 *   "offset": 0
 * }
 * ```
 *
 * Filters on `subdomain` are replaced by the caller's own subdomain. Callers
 * without one get an empty list.
 */
pub async fn product_search(
    State(state): State<AppState>,
    session: Option<Extension<SessionContext>>,
    body: Result<Json<QueryOptions>, JsonRejection>,
) -> ApiResult<Vec<Product>> {
    let Json(options) = body?;
    let session = session.map(|Extension(ctx)| ctx).unwrap_or_default();

    let listing = state.products.search(&session, options).await?;
    let count = listing.products.len();

    Ok(ApiResponse::success(listing.products)
        .with_meta("count", json!(count))
        .with_meta("query", json!(listing.query)))
}

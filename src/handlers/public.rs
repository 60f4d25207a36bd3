// handlers/public.rs - Unauthenticated service endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Catalog API",
            "version": version,
            "description": "Multi-tenant products and variations service",
            "endpoints": {
                "health": "/health (public)",
                "create": "POST /api/v1/products (API key)",
                "show": "GET /api/v1/products/:id (session)",
                "update": "PATCH /api/v1/products/:id (API key)",
                "delete": "DELETE /api/v1/products/:id (API key)",
                "search": "POST /api/v1/products/search (session)",
                "variations": "/api/v1/products/:id/variations[/:variation_id] (API key)",
            }
        }
    }))
}

/// GET /health - document store reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Document store health check failed: {}", e);
            let (status, Json(mut body)) = ApiError::service_unavailable("document store unavailable").into_parts();
            body["data"] = json!({
                "status": "degraded",
                "timestamp": now
            });
            (status, Json(body))
        }
    }
}

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::fingerprint;
use crate::context::ApiKeyContext;
use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// API-key authentication for the write routes.
///
/// Validates `X-API-KEY` with the key service, checks the configured write
/// permission and injects an [`ApiKeyContext`] for the handlers.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let api_key = extract_api_key(&headers).map_err(|msg| ApiError::unauthorized(msg).into_parts())?;
    let key_fp = fingerprint(&api_key);

    let info = state.api_keys.validate(&api_key).await.map_err(|e| {
        tracing::warn!(key = %key_fp, "API key validation failed: {}", e);
        ApiError::from(e).into_parts()
    })?;

    if !info.active {
        tracing::warn!(key = %key_fp, key_id = %info.key_id, "inactive API key");
        return Err(ApiError::unauthorized("Invalid or missing API Key.").into_parts());
    }

    let context = ApiKeyContext::from(info);
    if !context.has_permission(&state.write_permission) {
        tracing::warn!(key_id = %context.key_id, permission = %state.write_permission, "API key lacks permission");
        return Err(ApiError::forbidden(format!(
            "API key lacks the '{}' permission.",
            state.write_permission
        ))
        .into_parts());
    }

    tracing::debug!(key_id = %context.key_id, subdomains = ?context.allowed_subdomains, "API key accepted");
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

fn extract_api_key(headers: &HeaderMap) -> Result<String, &'static str> {
    let value = headers
        .get(API_KEY_HEADER)
        .ok_or("Invalid or missing API Key.")?
        .to_str()
        .map_err(|_| "Invalid or missing API Key.")?
        .trim();

    if value.is_empty() {
        return Err("Invalid or missing API Key.");
    }
    Ok(value.to_string())
}

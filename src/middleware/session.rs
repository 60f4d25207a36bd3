use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::AuthError;
use crate::context::SessionContext;
use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";
pub const SUBDOMAIN_HEADER: &str = "x-client-subdomain";

/// Session resolution for the read routes.
///
/// Requests without a session continue anonymously, with the subdomain
/// header (if any) as their tenant. A session must come with a subdomain
/// header and must validate as active.
pub async fn session_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let subdomain = header_value(&headers, SUBDOMAIN_HEADER);

    let context = match header_value(&headers, SESSION_HEADER) {
        None => SessionContext::anonymous(subdomain),
        Some(session_id) => {
            let Some(subdomain) = subdomain else {
                return Err(ApiError::unauthorized(
                    "X-Client-Subdomain header is required when providing a session.",
                )
                .into_parts());
            };

            // Any validation failure, including an unreachable service, is a 401
            let session = state.sessions.validate(&session_id).await.map_err(|e| {
                match &e {
                    AuthError::Rejected(_) => tracing::warn!(subdomain = %subdomain, "session rejected: {}", e),
                    AuthError::Unavailable(_) => tracing::error!(subdomain = %subdomain, "session service unavailable: {}", e),
                }
                ApiError::unauthorized("Invalid or expired session.").into_parts()
            })?;

            if !session.active {
                tracing::warn!(uid = %session.uid, "inactive session");
                return Err(ApiError::unauthorized("Invalid or expired session.").into_parts());
            }

            SessionContext::authenticated(subdomain, session)
        }
    };

    tracing::debug!(subdomain = ?context.subdomain, uid = ?context.uid, "session resolved");
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

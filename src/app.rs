use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::{api_key_middleware, session_middleware};
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Session-scoped reads and API-key writes share paths
        .merge(read_routes(state.clone()))
        .merge(write_routes(state.clone()))
        .with_state(state);

    let router = if config.security.enable_cors {
        router.layer(cors_layer(config))
    } else {
        router
    };

    // Global middleware
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes)),
    )
}

fn read_routes(state: AppState) -> Router<AppState> {
    use handlers::products;

    Router::new()
        .route("/api/v1/products/search", post(products::product_search))
        .route("/api/v1/products/:id", get(products::product_show))
        .layer(middleware::from_fn_with_state(state, session_middleware))
}

fn write_routes(state: AppState) -> Router<AppState> {
    use handlers::{products, variations};

    Router::new()
        .route("/api/v1/products", post(products::product_create))
        .route(
            "/api/v1/products/:id",
            patch(products::product_update).delete(products::product_delete),
        )
        .route("/api/v1/products/:id/variations", post(variations::variation_create))
        .route(
            "/api/v1/products/:id/variations/:variation_id",
            patch(variations::variation_update).delete(variations::variation_delete),
        )
        .layer(middleware::from_fn_with_state(state, api_key_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

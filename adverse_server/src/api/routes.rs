//! API route definitions

use super::handlers;
use adverse_core::SharedEngine;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the API router
pub fn create_router(engine: SharedEngine, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/submit", post(handlers::submit))
        .route("/network", get(handlers::network))
        .route("/reset", post(handlers::reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// Build the CORS policy for a list of allowed origins.
///
/// An empty list or a `*` entry allows any origin. Entries that are not valid
/// header values are dropped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<&str> = allowed_origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .collect();

    let allow_origin = if origins.is_empty() || origins.contains(&"*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .into_iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

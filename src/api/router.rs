//! API router.
//!
//! Layers (outermost → innermost): CORS → access log → body limit → handler.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config::{AllowedOrigins, ServiceConfig};

/// Build the API router.
pub fn api_router(ctx: ApiContext, config: &ServiceConfig) -> Router {
    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/health", get(endpoints::health::check))
        .route("/extract-text/image", post(endpoints::text::image))
        .route("/extract-text/pdf", post(endpoints::text::pdf))
        .route("/parse-parameters", post(endpoints::parameters::parse))
        .route("/process-document", post(endpoints::documents::process))
        .with_state(ctx)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config.allowed_origins))
                .layer(axum::middleware::from_fn(middleware::access_log::log_request))
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
}

/// Wildcard origins cannot carry credentials, so only an explicit origin
/// list enables them.
fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    match origins {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
                .allow_credentials(true)
        }
    }
}

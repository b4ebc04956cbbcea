use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Restricts CORS to one origin when configured, otherwise allows any.
pub fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION]);

    match allowed_origin.and_then(|origin| HeaderValue::from_str(origin).ok()) {
        Some(origin) => base.allow_origin(origin),
        None => {
            if let Some(origin) = allowed_origin {
                tracing::warn!(origin, "Ignoring unparsable CORS origin; allowing any");
            }
            base.allow_origin(Any)
        }
    }
}

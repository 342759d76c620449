// CORS middleware
use axum::http::{header, HeaderName, HeaderValue};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

/// Headers the download route sends so a browser page can play the asset
/// from an origin it could not reach directly.
pub fn media_cors_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Range"),
        ),
        (
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("Content-Disposition"),
        ),
    ]
}

/// Allow every origin and method. Requested headers are echoed back: the
/// `*` wildcard does not cover `Authorization`.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::CONTENT_DISPOSITION])
}

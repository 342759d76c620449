// Middleware module - Axum middleware

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::BearerToken;
pub use cors::{cors_layer, media_cors_headers};
pub use logging::trace_layer;

//! CORS middleware configuration for cross-origin requests.
//!
//! Storefront web clients call the recovery endpoints from their own origin.
//! Allowed origins come from `CorsConfig`; development profiles accept any
//! origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use shop_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// With CORS disabled, or no origins configured, only same-origin requests
/// pass the preflight check.
pub fn create_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        tracing::info!("CORS disabled; same-origin requests only");
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allow_any_origin {
        tracing::info!("Configuring CORS to accept any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|o| o.trim()) {
            if !origin.is_empty() {
                tracing::info!(origin = %origin, "Adding allowed origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

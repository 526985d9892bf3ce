//! Application factory
//!
//! Builds the actix-web `App` with middleware, routes and the JSON extractor
//! configuration. `main` and the integration tests both go through
//! [`create_app`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::DefaultHeaders,
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use shop_core::repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
use shop_core::services::MailServiceTrait;
use shop_shared::config::AppConfig;

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::create_cors;
use crate::routes::auth::{reset_password, send_otp, verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<A, O, G, M>(
    app_state: web::Data<AppState<A, O, G, M>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    O: OtpRepository + 'static,
    G: ResetGrantRepository + 'static,
    M: MailServiceTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Outermost wrap runs first: request span, then CORS, then headers
        .wrap(
            DefaultHeaders::new()
                .add(("X-Content-Type-Options", "nosniff"))
                .add(("Cache-Control", "no-store")),
        )
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/otp/send", web::post().to(send_otp::<A, O, G, M>))
                    .route("/otp/verify", web::post().to(verify_otp::<A, O, G, M>))
                    .route(
                        "/password/reset",
                        web::post().to(reset_password::<A, O, G, M>),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-recovery-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use shop_api::{create_app, telemetry, AppState};
use shop_core::services::{
    OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig, PasswordResetConfig,
    PasswordResetService,
};
use shop_infra::database::{
    DatabasePool, MySqlAccountRepository, MySqlOtpRepository, MySqlResetGrantRepository,
};
use shop_infra::mail::create_mail_service;
use shop_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    telemetry::init_tracing(&config.logging).context("installing tracing subscriber")?;

    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        "Starting storefront recovery API"
    );

    let db = DatabasePool::new(config.database.clone())
        .await
        .context("connecting to MySQL")?;
    if config.database.run_migrations {
        db.run_migrations().await.context("applying migrations")?;
    }
    tracing::info!("{}", db.get_statistics());

    let accounts = Arc::new(MySqlAccountRepository::new(db.get_pool().clone()));
    let otps = Arc::new(MySqlOtpRepository::new(db.get_pool().clone()));
    let grants = Arc::new(MySqlResetGrantRepository::new(db.get_pool().clone()));
    let mail = Arc::new(
        create_mail_service(&config.mail, config.otp.expiry_minutes)
            .context("configuring mail transport")?,
    );

    let otp_service = Arc::new(OtpService::new(
        accounts.clone(),
        otps.clone(),
        grants.clone(),
        mail,
        OtpServiceConfig::from(&config),
    ));
    let password_service = Arc::new(PasswordResetService::new(
        accounts,
        grants.clone(),
        PasswordResetConfig::from(&config),
    ));

    let cleanup = Arc::new(OtpCleanupService::new(
        otps,
        grants,
        OtpCleanupConfig::from(&config.cleanup),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(otp_service, password_service));
    let http_config = config.clone();

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &http_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .client_request_timeout(Duration::from_secs(config.server.request_timeout));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("binding {}", config.server.bind_address()))?
        .run()
        .await
        .context("running HTTP server")?;

    if let Some(handle) = cleanup_task {
        handle.abort();
    }
    db.close().await;

    tracing::info!("Server stopped");
    Ok(())
}

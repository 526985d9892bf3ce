//! Mail module for passcode delivery.
//!
//! The provider is chosen at startup from `MailConfig`; [`MailDispatcher`]
//! is the concrete type the services are built with.

mod log_mail;
#[cfg(feature = "smtp-mail")]
mod smtp;
mod templates;

pub use log_mail::{LogMailService, RecordedMail, MAX_RECORDED_MAILS};
#[cfg(feature = "smtp-mail")]
pub use smtp::SmtpMailService;
pub use templates::OtpEmailContent;

use async_trait::async_trait;

use shop_core::services::otp::MailServiceTrait;
use shop_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;

/// Runtime-selected mail provider
pub enum MailDispatcher {
    Log(LogMailService),
    #[cfg(feature = "smtp-mail")]
    Smtp(SmtpMailService),
}

#[async_trait]
impl MailServiceTrait for MailDispatcher {
    async fn send_otp(&self, to: &str, code: &str) -> Result<String, String> {
        match self {
            MailDispatcher::Log(service) => service.send_otp(to, code).await,
            #[cfg(feature = "smtp-mail")]
            MailDispatcher::Smtp(service) => service.send_otp(to, code).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            MailDispatcher::Log(service) => service.provider_name(),
            #[cfg(feature = "smtp-mail")]
            MailDispatcher::Smtp(service) => service.provider_name(),
        }
    }
}

/// Create a mail dispatcher from configuration
///
/// `expiry_minutes` is quoted in the message body.
pub fn create_mail_service(
    config: &MailConfig,
    expiry_minutes: i64,
) -> Result<MailDispatcher, InfrastructureError> {
    match config.provider {
        MailProvider::Log if config.log_codes => {
            tracing::warn!("Using log mail provider; passcodes are written to the log");
            Ok(MailDispatcher::Log(LogMailService::logging_codes()))
        }
        MailProvider::Log => {
            tracing::warn!("Using log mail provider; passcodes are not delivered");
            Ok(MailDispatcher::Log(LogMailService::new()))
        }
        #[cfg(feature = "smtp-mail")]
        MailProvider::Smtp => {
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                tls = config.use_tls,
                "Using SMTP mail provider"
            );
            Ok(MailDispatcher::Smtp(SmtpMailService::new(config, expiry_minutes)?))
        }
        #[cfg(not(feature = "smtp-mail"))]
        MailProvider::Smtp => {
            let _ = expiry_minutes;
            Err(InfrastructureError::Config(
                "SMTP support not compiled in. Enable the 'smtp-mail' feature.".to_string(),
            ))
        }
    }
}

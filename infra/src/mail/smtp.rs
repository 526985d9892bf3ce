//! SMTP mail delivery through lettre.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use shop_core::services::otp::MailServiceTrait;
use shop_shared::config::MailConfig;
use shop_shared::utils::email::mask_email;

use super::templates::OtpEmailContent;
use crate::InfrastructureError;

/// SMTP mail service
pub struct SmtpMailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    platform_name: String,
    expiry_minutes: i64,
}

impl SmtpMailService {
    /// Create a new SMTP mail service
    ///
    /// Port 465 uses implicit TLS, other ports STARTTLS. With `use_tls`
    /// disabled the connection is plaintext, for local relays only.
    pub fn new(config: &MailConfig, expiry_minutes: i64) -> Result<Self, InfrastructureError> {
        let host = config.smtp_host.as_str();

        let mut builder = if config.use_tls {
            let tls_params = TlsParameters::new(host.to_string()).map_err(|e| {
                InfrastructureError::Mail(format!("TLS configuration error: {}", e))
            })?;

            if config.smtp_port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| InfrastructureError::Mail(format!("SMTP relay error: {}", e)))?
                    .port(config.smtp_port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| InfrastructureError::Mail(format!("SMTP relay error: {}", e)))?
                    .port(config.smtp_port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(config.smtp_port)
        };

        if let (Some(user), Some(pass)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = Self::sender(config)?;

        Ok(Self {
            transport: builder.build(),
            from,
            platform_name: config.platform_name.clone(),
            expiry_minutes,
        })
    }

    fn sender(config: &MailConfig) -> Result<Mailbox, InfrastructureError> {
        let address = config
            .from_address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;
        Ok(Mailbox::new(config.from_name.clone(), address))
    }

    /// Build the multipart passcode message
    fn build_message(&self, to: &str, code: &str, message_id: &str) -> Result<Message, String> {
        let content = OtpEmailContent::new(code, &self.platform_name, self.expiry_minutes);

        Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| format!("Invalid recipient address: {}", e))?)
            .message_id(Some(message_id.to_string()))
            .subject(content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|e| format!("Failed to build email: {}", e))
    }

    fn new_message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain())
    }
}

#[async_trait]
impl MailServiceTrait for SmtpMailService {
    async fn send_otp(&self, to: &str, code: &str) -> Result<String, String> {
        let message_id = self.new_message_id();
        let message = self.build_message(to, code, &message_id)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP send failed: {}", e))?;

        tracing::info!(
            to = %mask_email(to),
            message_id = %message_id,
            event = "otp_email_sent",
            "Sent passcode email"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_shared::config::MailProvider;

    fn local_config() -> MailConfig {
        MailConfig {
            provider: MailProvider::Smtp,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            use_tls: false,
            from_name: Some("Storefront".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_service_creation_no_tls() {
        assert!(SmtpMailService::new(&local_config(), 10).is_ok());
    }

    #[tokio::test]
    async fn test_service_creation_with_credentials() {
        let config = MailConfig {
            smtp_username: Some("user".to_string()),
            smtp_password: Some("pass".to_string()),
            ..local_config()
        };
        assert!(SmtpMailService::new(&config, 10).is_ok());
    }

    #[tokio::test]
    async fn test_build_message() {
        let service = SmtpMailService::new(&local_config(), 10).unwrap();
        let message_id = service.new_message_id();
        assert!(message_id.ends_with("@storefront.local>"));

        let message = service
            .build_message("user@example.com", "482913", &message_id)
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("482913"));
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let service = SmtpMailService::new(&local_config(), 10).unwrap();
        assert!(service.build_message("not an address", "482913", "<id@x>").is_err());
    }
}

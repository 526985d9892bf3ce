//! Traits for mail service integration

use async_trait::async_trait;

/// Trait for outbound mail integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a one-time passcode to an email address, returning the message id
    async fn send_otp(&self, to: &str, code: &str) -> Result<String, String>;
    /// Short provider name for logs
    fn provider_name(&self) -> &'static str;
}

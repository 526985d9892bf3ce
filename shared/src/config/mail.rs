//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Which mail dispatcher the server wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Record and log sends without contacting a mail server
    Log,
    /// Deliver through an SMTP relay
    Smtp,
}

/// Mail dispatcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default = "default_provider")]
    pub provider: MailProvider,

    /// SMTP relay host
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP port; 465 selects implicit TLS, anything else STARTTLS
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Disable only for local relays such as MailHog
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// Envelope sender
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Display name for the sender
    #[serde(default)]
    pub from_name: Option<String>,

    /// Name shown in message subject and body
    #[serde(default = "default_platform_name")]
    pub platform_name: String,

    /// Write passcodes to the log; only honored by the log provider
    #[serde(default)]
    pub log_codes: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            use_tls: default_use_tls(),
            from_address: default_from_address(),
            from_name: None,
            platform_name: default_platform_name(),
            log_codes: false,
        }
    }
}

impl MailConfig {
    /// Log provider that prints passcodes, for local development
    pub fn development() -> Self {
        Self {
            log_codes: true,
            ..Default::default()
        }
    }

    /// SMTP provider with otherwise default settings
    pub fn smtp_defaults() -> Self {
        Self {
            provider: MailProvider::Smtp,
            smtp_host: String::from("localhost"),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == MailProvider::Smtp && self.smtp_host.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "mail.smtp_host is required for the smtp provider".to_string(),
            ));
        }
        if !crate::utils::email::is_valid_email(&self.from_address) {
            return Err(ConfigError::Invalid(format!(
                "mail.from_address is not a valid address: {}",
                self.from_address
            )));
        }
        Ok(())
    }

    /// Production may neither drop passcodes nor write them to the log
    pub(crate) fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.provider == MailProvider::Log {
            return Err(ConfigError::Invalid(
                "mail.provider = \"log\" is not allowed in production".to_string(),
            ));
        }
        if self.log_codes {
            return Err(ConfigError::Invalid(
                "mail.log_codes is not allowed in production".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_provider() -> MailProvider {
    MailProvider::Log
}

fn default_smtp_port() -> u16 {
    587
}

fn default_use_tls() -> bool {
    true
}

fn default_from_address() -> String {
    String::from("no-reply@storefront.local")
}

fn default_platform_name() -> String {
    String::from("Storefront")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_requires_host() {
        let config = MailConfig {
            provider: MailProvider::Smtp,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(MailConfig::smtp_defaults().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_log_provider() {
        assert!(MailConfig::default().validate_for_production().is_err());
        assert!(MailConfig::development().validate_for_production().is_err());

        let logging_smtp = MailConfig {
            log_codes: true,
            ..MailConfig::smtp_defaults()
        };
        assert!(logging_smtp.validate_for_production().is_err());
        assert!(MailConfig::smtp_defaults().validate_for_production().is_ok());
    }

    #[test]
    fn test_rejects_bad_sender() {
        let config = MailConfig {
            from_address: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

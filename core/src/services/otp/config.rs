//! Configuration for the passcode service

use shop_shared::config::AppConfig;

use crate::domain::entities::otp_record::DEFAULT_EXPIRATION_MINUTES;
use crate::domain::entities::reset_grant::DEFAULT_GRANT_TTL_MINUTES;

/// Configuration for the passcode service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a code expires
    pub code_expiration_minutes: i64,
    /// Delete outstanding codes for an email before issuing a new one
    pub invalidate_previous_on_issue: bool,
    /// Record a reset grant when a code is verified
    pub issue_reset_grant: bool,
    /// Number of minutes a reset grant stays usable
    pub grant_ttl_minutes: i64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            invalidate_previous_on_issue: false,
            issue_reset_grant: true,
            grant_ttl_minutes: DEFAULT_GRANT_TTL_MINUTES,
        }
    }
}

impl From<&AppConfig> for OtpServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            code_expiration_minutes: config.otp.expiry_minutes,
            invalidate_previous_on_issue: config.otp.invalidate_previous_on_issue,
            issue_reset_grant: config.reset.require_verified_otp,
            grant_ttl_minutes: config.reset.grant_ttl_minutes,
        }
    }
}

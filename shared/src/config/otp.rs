//! One-time passcode, password and cleanup policy

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Upper bound for passcode expiry and reset grant lifetime (one day)
pub const MAX_LIFETIME_MINUTES: i64 = 24 * 60;

/// Largest configurable minimum password length; bcrypt reads at most 72 bytes
pub const MAX_MIN_PASSWORD_LENGTH: usize = 72;

/// One-time passcode issuance policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes from issuance until a code expires
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,

    /// Delete every outstanding code for an email before issuing a new one.
    /// Off by default: several codes may be valid at once and the newest
    /// matching one is consumed first.
    #[serde(default)]
    pub invalidate_previous_on_issue: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: default_expiry_minutes(),
            invalidate_previous_on_issue: false,
        }
    }
}

impl OtpConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LIFETIME_MINUTES).contains(&self.expiry_minutes) {
            return Err(ConfigError::Invalid(format!(
                "otp.expiry_minutes must be within 1..={}, got {}",
                MAX_LIFETIME_MINUTES, self.expiry_minutes
            )));
        }
        Ok(())
    }
}

/// Password hashing policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            min_length: default_min_length(),
        }
    }
}

impl PasswordConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "password.bcrypt_cost must be within 4..=31, got {}",
                self.bcrypt_cost
            )));
        }
        if !(1..=MAX_MIN_PASSWORD_LENGTH).contains(&self.min_length) {
            return Err(ConfigError::Invalid(format!(
                "password.min_length must be within 1..={}, got {}",
                MAX_MIN_PASSWORD_LENGTH, self.min_length
            )));
        }
        Ok(())
    }
}

/// Password reset policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResetConfig {
    /// Require a grant from a successful OTP verification before a reset
    #[serde(default = "default_require_verified_otp")]
    pub require_verified_otp: bool,

    /// Minutes a verification grant stays usable
    #[serde(default = "default_grant_ttl_minutes")]
    pub grant_ttl_minutes: i64,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            require_verified_otp: default_require_verified_otp(),
            grant_ttl_minutes: default_grant_ttl_minutes(),
        }
    }
}

impl ResetConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.require_verified_otp
            && !(1..=MAX_LIFETIME_MINUTES).contains(&self.grant_ttl_minutes)
        {
            return Err(ConfigError::Invalid(format!(
                "reset.grant_ttl_minutes must be within 1..={}, got {}",
                MAX_LIFETIME_MINUTES, self.grant_ttl_minutes
            )));
        }
        Ok(())
    }
}

/// Background sweeper for expired codes and grants
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether to run the sweeper
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,

    /// Seconds between sweeps
    #[serde(default = "default_cleanup_interval")]
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_cleanup_enabled(),
            interval_seconds: default_cleanup_interval(),
        }
    }
}

impl CleanupConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "cleanup.interval_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_expiry_minutes() -> i64 {
    10
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_min_length() -> usize {
    8
}

fn default_require_verified_otp() -> bool {
    true
}

fn default_grant_ttl_minutes() -> i64 {
    10
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    3600
}

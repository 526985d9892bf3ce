//! Configuration for the password reset service

use shop_shared::config::AppConfig;

/// Longest accepted password in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// bcrypt only reads the first 72 bytes of its input; longer passwords are
/// rejected rather than silently truncated.
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Clone)]
pub struct PasswordResetConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Minimum password length in characters
    pub min_length: usize,
    /// Maximum password length in characters
    pub max_length: usize,
    /// Consume a reset grant before changing the password
    pub require_verified_otp: bool,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_length: 8,
            max_length: MAX_PASSWORD_LENGTH,
            require_verified_otp: true,
        }
    }
}

impl From<&AppConfig> for PasswordResetConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            bcrypt_cost: config.password.bcrypt_cost,
            min_length: config.password.min_length,
            max_length: MAX_PASSWORD_LENGTH,
            require_verified_otp: config.reset.require_verified_otp,
        }
    }
}

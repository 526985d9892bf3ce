//! Password reset service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shop_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ResetGrantRepository};
use crate::services::clock::{Clock, SystemClock};

use super::config::{PasswordResetConfig, BCRYPT_MAX_PASSWORD_BYTES};
use super::hasher::BcryptPasswordHasher;

/// Result of a successful password reset
#[derive(Debug, Clone)]
pub struct ResetPasswordResult {
    pub email: String,
    pub reset_at: DateTime<Utc>,
}

/// Service overwriting account credentials
pub struct PasswordResetService<A: AccountRepository, G: ResetGrantRepository> {
    accounts: Arc<A>,
    grants: Arc<G>,
    hasher: BcryptPasswordHasher,
    clock: Arc<dyn Clock>,
    config: PasswordResetConfig,
}

impl<A: AccountRepository, G: ResetGrantRepository> PasswordResetService<A, G> {
    pub fn new(accounts: Arc<A>, grants: Arc<G>, config: PasswordResetConfig) -> Self {
        Self::with_clock(accounts, grants, Arc::new(SystemClock), config)
    }

    pub fn with_clock(
        accounts: Arc<A>,
        grants: Arc<G>,
        clock: Arc<dyn Clock>,
        config: PasswordResetConfig,
    ) -> Self {
        Self {
            accounts,
            grants,
            hasher: BcryptPasswordHasher::new(config.bcrypt_cost),
            clock,
            config,
        }
    }

    pub fn hasher(&self) -> &BcryptPasswordHasher {
        &self.hasher
    }

    /// Replace the password of the account registered under `email`
    ///
    /// This method:
    /// 1. Validates the email and the password length
    /// 2. Consumes an unexpired reset grant when grants are required
    /// 3. Hashes the new password with bcrypt
    /// 4. Overwrites the stored hash
    ///
    /// # Returns
    ///
    /// * `Ok(ResetPasswordResult)` - Credential replaced
    /// * `Err(DomainError::Validation)` - Malformed email or password length out of range
    /// * `Err(DomainError::ResetNotAuthorized)` - No unexpired grant for the email
    /// * `Err(DomainError::NotFound)` - No account row was updated
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> DomainResult<ResetPasswordResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email format".to_string(),
            });
        }
        self.validate_password(new_password)?;
        let masked = mask_email(&email);

        // Hash before touching the grant so a hashing failure leaves it usable
        let password_hash = self.hasher.hash(new_password).await?;

        let now = self.clock.now();
        if self.config.require_verified_otp {
            self.consume_grant(&email, &masked, now).await?;
        }

        if !self
            .accounts
            .update_password_hash(&email, &password_hash)
            .await?
        {
            tracing::warn!(
                email = %masked,
                event = "password_reset_unknown_account",
                "Password reset matched no account"
            );
            return Err(DomainError::account_not_found());
        }

        tracing::info!(
            email = %masked,
            event = "password_reset",
            "Password reset completed"
        );

        Ok(ResetPasswordResult {
            email,
            reset_at: now,
        })
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        let length = password.chars().count();
        if length < self.config.min_length || length > self.config.max_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be between {} and {} characters",
                    self.config.min_length, self.config.max_length
                ),
            });
        }
        if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at most {} bytes",
                    BCRYPT_MAX_PASSWORD_BYTES
                ),
            });
        }
        Ok(())
    }

    async fn consume_grant(
        &self,
        email: &str,
        masked: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let grant = match self.grants.find_latest_valid(email, now).await? {
            Some(grant) => grant,
            None => {
                tracing::warn!(
                    email = %masked,
                    event = "password_reset_unauthorized",
                    "Password reset attempted without a verified passcode"
                );
                return Err(DomainError::ResetNotAuthorized);
            }
        };

        if !self.grants.delete_by_id(grant.id).await? {
            tracing::warn!(
                email = %masked,
                grant_id = %grant.id,
                event = "reset_grant_already_consumed",
                "Reset grant consumed by a concurrent request"
            );
            return Err(DomainError::ResetNotAuthorized);
        }

        Ok(())
    }
}

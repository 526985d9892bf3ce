//! Main passcode service implementation

use std::sync::Arc;

use shop_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::otp_record::OtpRecord;
use crate::domain::entities::reset_grant::ResetGrant;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
use crate::services::clock::{Clock, SystemClock};

use super::config::OtpServiceConfig;
use super::traits::MailServiceTrait;
use super::types::{IssueOtpResult, VerifyOtpResult};

/// Passcode service for issuing and verifying email one-time passcodes
pub struct OtpService<A, O, G, M>
where
    A: AccountRepository,
    O: OtpRepository,
    G: ResetGrantRepository,
    M: MailServiceTrait,
{
    /// Account lookup
    accounts: Arc<A>,
    /// Passcode storage
    otps: Arc<O>,
    /// Reset grant storage
    grants: Arc<G>,
    /// Outbound mail
    mail: Arc<M>,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<A, O, G, M> OtpService<A, O, G, M>
where
    A: AccountRepository,
    O: OtpRepository,
    G: ResetGrantRepository,
    M: MailServiceTrait,
{
    /// Create a new passcode service reading the system clock
    pub fn new(
        accounts: Arc<A>,
        otps: Arc<O>,
        grants: Arc<G>,
        mail: Arc<M>,
        config: OtpServiceConfig,
    ) -> Self {
        Self::with_clock(accounts, otps, grants, mail, Arc::new(SystemClock), config)
    }

    /// Create a new passcode service with an explicit clock
    pub fn with_clock(
        accounts: Arc<A>,
        otps: Arc<O>,
        grants: Arc<G>,
        mail: Arc<M>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            accounts,
            otps,
            grants,
            mail,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a passcode to the account registered under `email`
    ///
    /// This method:
    /// 1. Normalizes and validates the email
    /// 2. Confirms an account exists for it
    /// 3. Optionally removes outstanding codes for the email
    /// 4. Stores a new code expiring after the configured window
    /// 5. Sends the code by email
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOtpResult)` - Code stored and handed to the mail provider
    /// * `Err(DomainError::Validation)` - Malformed email
    /// * `Err(DomainError::NotFound)` - No account for the email; nothing is stored or sent
    /// * `Err(DomainError::DeliveryFailure)` - Mail provider rejected the message
    /// * `Err(DomainError::StoreFailure)` - Storage error
    pub async fn issue_otp(&self, email: &str) -> DomainResult<IssueOtpResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email format".to_string(),
            });
        }
        let masked = mask_email(&email);

        if !self.accounts.exists_by_email(&email).await? {
            tracing::info!(
                email = %masked,
                event = "otp_issue_unknown_account",
                "Passcode requested for an unregistered email"
            );
            return Err(DomainError::account_not_found());
        }

        if self.config.invalidate_previous_on_issue {
            let removed = self.otps.delete_by_email(&email).await?;
            tracing::debug!(
                email = %masked,
                removed = removed,
                event = "otp_previous_invalidated",
                "Removed outstanding passcodes before reissue"
            );
        }

        let record = OtpRecord::new(
            email.clone(),
            self.clock.now(),
            self.config.code_expiration_minutes,
        );
        let record = self.otps.insert(record).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store passcode"
            );
            e
        })?;

        tracing::info!(
            email = %masked,
            otp_id = %record.id,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued new passcode"
        );

        // The stored row stays in place on delivery failure; it expires normally.
        let message_id = self
            .mail
            .send_otp(&email, &record.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    provider = self.mail.provider_name(),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send passcode email"
                );
                DomainError::DeliveryFailure { message: e }
            })?;

        Ok(IssueOtpResult {
            otp_id: record.id,
            email,
            expires_at: record.expires_at,
            message_id,
        })
    }

    /// Verify and consume a passcode
    ///
    /// Looks up the newest unexpired record matching both email and code and
    /// deletes it by id. Wrong code, wrong email, expired code, malformed code
    /// and losing a race to a concurrent verifier all fail with the same
    /// `DomainError::InvalidOtp`.
    ///
    /// When the service issues reset grants, the grant is recorded before the
    /// code is consumed. A failed grant write leaves the code in place, and a
    /// grant recorded for a code that could not be consumed is removed again.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<VerifyOtpResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email format".to_string(),
            });
        }
        let masked = mask_email(&email);
        let code = code.trim();

        if !OtpRecord::is_well_formed_code(code) {
            tracing::warn!(
                email = %masked,
                event = "invalid_code_format",
                code_length = code.len(),
                "Malformed passcode provided"
            );
            return Err(DomainError::InvalidOtp);
        }

        let now = self.clock.now();
        let record = match self.otps.find_latest_valid(&email, code, now).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = %masked,
                    event = "otp_verification_failed",
                    "No unexpired passcode matched"
                );
                return Err(DomainError::InvalidOtp);
            }
        };

        // The grant is written before the code is consumed so a store failure
        // leaves the code usable for a retry.
        let grant = if self.config.issue_reset_grant {
            let grant = ResetGrant::new(email.clone(), now, self.config.grant_ttl_minutes);
            Some(self.grants.insert(grant).await.map_err(|e| {
                tracing::error!(
                    email = %masked,
                    otp_id = %record.id,
                    error = %e,
                    event = "reset_grant_store_failed",
                    "Failed to record reset grant; passcode left in place"
                );
                e
            })?)
        } else {
            None
        };

        let consumed = match self.otps.delete_by_id(record.id).await {
            Ok(consumed) => consumed,
            Err(e) => {
                self.discard_grant(grant.as_ref(), &masked).await;
                return Err(e);
            }
        };

        if !consumed {
            self.discard_grant(grant.as_ref(), &masked).await;
            tracing::warn!(
                email = %masked,
                otp_id = %record.id,
                event = "otp_already_consumed",
                "Passcode consumed by a concurrent request"
            );
            return Err(DomainError::InvalidOtp);
        }

        tracing::info!(
            email = %masked,
            otp_id = %record.id,
            event = "otp_verified_success",
            "Passcode verified and consumed"
        );

        if let Some(grant) = &grant {
            tracing::debug!(
                email = %masked,
                grant_id = %grant.id,
                event = "reset_grant_recorded",
                "Recorded password reset grant"
            );
        }

        Ok(VerifyOtpResult {
            email,
            verified_at: now,
            grant_expires_at: grant.map(|g| g.expires_at),
        })
    }

    /// Remove a grant recorded for a verification that did not go through
    async fn discard_grant(&self, grant: Option<&ResetGrant>, masked: &str) {
        let Some(grant) = grant else {
            return;
        };
        if let Err(e) = self.grants.delete_by_id(grant.id).await {
            tracing::error!(
                email = %masked,
                grant_id = %grant.id,
                error = %e,
                event = "reset_grant_discard_failed",
                "Failed to remove reset grant of an unconsumed passcode"
            );
        }
    }
}

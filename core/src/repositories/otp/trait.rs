//! One-time passcode repository trait.
//!
//! Consumption is find-then-delete by primary key: `delete_by_id` reports
//! whether this caller removed the row, so of several concurrent verifiers
//! holding the same record only one observes `true`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a newly issued record
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Newest record matching `email` and `code` with `expires_at >= now`
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Most recently created match
    /// * `Ok(None)` - No unexpired record matches both fields
    /// * `Err(DomainError::StoreFailure)` - Database error occurred
    async fn find_latest_valid(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Delete a record by id
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the record
    /// * `Ok(false)` - The record was already gone
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every outstanding record for an email, returning the count
    async fn delete_by_email(&self, email: &str) -> Result<u64, DomainError>;

    /// Delete records with `expires_at < now`, returning the count
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}

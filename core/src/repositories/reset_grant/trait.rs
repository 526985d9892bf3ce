//! Reset grant repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::reset_grant::ResetGrant;
use crate::errors::DomainError;

#[async_trait]
pub trait ResetGrantRepository: Send + Sync {
    async fn insert(&self, grant: ResetGrant) -> Result<ResetGrant, DomainError>;

    /// Newest grant for `email` with `expires_at >= now`
    async fn find_latest_valid(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResetGrant>, DomainError>;

    /// `Ok(true)` only for the caller that removed the grant
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}

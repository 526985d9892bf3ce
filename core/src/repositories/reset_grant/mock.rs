//! In-memory implementation of ResetGrantRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::reset_grant::ResetGrant;
use crate::errors::DomainError;

use super::trait_::ResetGrantRepository;

#[derive(Clone, Default)]
pub struct MockResetGrantRepository {
    grants: Arc<RwLock<HashMap<Uuid, ResetGrant>>>,
    fail_inserts: bool,
}

impl MockResetGrantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose inserts fail with a store error
    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.grants.read().await.is_empty()
    }
}

#[async_trait]
impl ResetGrantRepository for MockResetGrantRepository {
    async fn insert(&self, grant: ResetGrant) -> Result<ResetGrant, DomainError> {
        if self.fail_inserts {
            return Err(DomainError::store("mock reset grant store unavailable"));
        }
        let mut grants = self.grants.write().await;
        grants.insert(grant.id, grant.clone());
        Ok(grant)
    }

    async fn find_latest_valid(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResetGrant>, DomainError> {
        let grants = self.grants.read().await;
        Ok(grants
            .values()
            .filter(|g| g.email == email && !g.is_expired_at(now))
            .max_by_key(|g| (g.created_at, g.id))
            .cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut grants = self.grants.write().await;
        Ok(grants.remove(&id).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut grants = self.grants.write().await;
        let before = grants.len();
        grants.retain(|_, g| !g.is_expired_at(now));
        Ok((before - grants.len()) as u64)
    }
}

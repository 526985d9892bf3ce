//! In-memory implementation of OtpRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// Mock passcode repository
#[derive(Clone, Default)]
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
    should_fail: bool,
}

impl MockOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every call fails with a storage error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of all stored records for an email, oldest first
    pub async fn records_for(&self, email: &str) -> Vec<OtpRecord> {
        let records = self.records.read().await;
        let mut matching: Vec<OtpRecord> = records
            .values()
            .filter(|r| r.email == email)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.created_at);
        matching
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::store("mock otp store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_latest_valid(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.check()?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.accepts(email, code, now))
            .max_by_key(|r| (r.created_at, r.id))
            .cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        Ok(records.remove(&id).is_some())
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.email != email);
        Ok((before - records.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired_at(now));
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(email: &str, code: &str, created_at: DateTime<Utc>) -> OtpRecord {
        OtpRecord::with_code(email.into(), code.into(), created_at, 10)
    }

    #[tokio::test]
    async fn test_find_latest_valid_prefers_newest() {
        let repo = MockOtpRepository::new();
        let now = Utc::now();
        let older = record("user@example.com", "111111", now - Duration::minutes(2));
        let newer = record("user@example.com", "111111", now - Duration::minutes(1));
        repo.insert(older).await.unwrap();
        repo.insert(newer.clone()).await.unwrap();

        let found = repo
            .find_latest_valid("user@example.com", "111111", now)
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(newer.id));
    }

    #[tokio::test]
    async fn test_find_latest_valid_same_timestamp_is_deterministic() {
        let repo = MockOtpRepository::new();
        let now = Utc::now();
        let first = record("user@example.com", "111111", now);
        let second = record("user@example.com", "111111", now);
        repo.insert(first.clone()).await.unwrap();
        repo.insert(second.clone()).await.unwrap();

        let found = repo
            .find_latest_valid("user@example.com", "111111", now)
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(first.id.max(second.id)));
    }

    #[tokio::test]
    async fn test_find_latest_valid_skips_expired() {
        let repo = MockOtpRepository::new();
        let now = Utc::now();
        repo.insert(record("user@example.com", "111111", now - Duration::minutes(11)))
            .await
            .unwrap();

        let found = repo
            .find_latest_valid("user@example.com", "111111", now)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_once() {
        let repo = MockOtpRepository::new();
        let stored = repo
            .insert(record("user@example.com", "111111", Utc::now()))
            .await
            .unwrap();

        assert!(repo.delete_by_id(stored.id).await.unwrap());
        assert!(!repo.delete_by_id(stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_records() {
        let repo = MockOtpRepository::new();
        let now = Utc::now();
        repo.insert(record("a@example.com", "111111", now - Duration::minutes(30)))
            .await
            .unwrap();
        repo.insert(record("b@example.com", "222222", now)).await.unwrap();

        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.records_for("b@example.com").await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_email() {
        let repo = MockOtpRepository::new();
        let now = Utc::now();
        repo.insert(record("a@example.com", "111111", now)).await.unwrap();
        repo.insert(record("a@example.com", "222222", now)).await.unwrap();
        repo.insert(record("b@example.com", "333333", now)).await.unwrap();

        assert_eq!(repo.delete_by_email("a@example.com").await.unwrap(), 2);
        assert_eq!(repo.len().await, 1);
    }
}

//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// Mock account repository keyed by email
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    should_fail: bool,
}

impl MockAccountRepository {
    /// Create an empty repository
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

    /// Repository pre-populated with accounts
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.email.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(map)),
            should_fail: false,
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::store("mock account store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.check()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.contains_key(email))
    }

    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(email) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                account.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::AccountRole;

    fn account(email: &str) -> Account {
        Account::new(email.into(), "Test".into(), "old-hash".into(), AccountRole::User)
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = MockAccountRepository::new();
        repo.create(account("user@example.com")).await.unwrap();

        let result = repo.create(account("user@example.com")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_password_hash() {
        let repo = MockAccountRepository::with_accounts([account("user@example.com")]);

        assert!(repo.update_password_hash("user@example.com", "new-hash").await.unwrap());
        assert!(!repo.update_password_hash("ghost@example.com", "new-hash").await.unwrap());

        let stored = repo.find_by_email("user@example.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "new-hash");
    }

    #[tokio::test]
    async fn test_failing_repository() {
        let repo = MockAccountRepository::failing();
        let result = repo.exists_by_email("user@example.com").await;
        assert!(matches!(result, Err(DomainError::StoreFailure { .. })));
    }
}

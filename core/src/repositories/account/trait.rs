//! Account repository trait defining the interface for account persistence.
//!
//! The recovery flow only reads accounts by email and overwrites the password
//! hash; `create` exists for seeding and tests. Emails passed in are expected
//! to be normalized already.

use async_trait::async_trait;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use shop_core::domain::entities::account::Account;
/// use shop_core::errors::DomainError;
/// use shop_core::repositories::AccountRepository;
///
/// struct PostgresAccountRepository;
///
/// #[async_trait]
/// impl AccountRepository for PostgresAccountRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///     async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///     async fn update_password_hash(&self, email: &str, hash: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///     async fn create(&self, account: Account) -> Result<Account, DomainError> {
///         Ok(account)
///     }
/// }
/// ```
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError::StoreFailure)` - Database error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether an account exists for the email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Overwrite the stored password hash of the account matching `email`
    ///
    /// # Returns
    /// * `Ok(true)` - A row was updated
    /// * `Ok(false)` - No account matched
    /// * `Err(DomainError::StoreFailure)` - Database error occurred
    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Persist a new account
    ///
    /// Fails with `DomainError::Validation` when the email is already registered.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;
}

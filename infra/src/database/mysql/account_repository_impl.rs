//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use shop_core::domain::entities::account::{Account, AccountRole};
use shop_core::errors::DomainError;
use shop_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("Failed to get id: {}", e)))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::store(format!("Failed to get role: {}", e)))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::store(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::store(format!("Failed to get email: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::store(format!("Failed to get name: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::store(format!("Failed to get password_hash: {}", e)))?,
            role: role
                .parse::<AccountRole>()
                .map_err(|e| DomainError::store(e.to_string()))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::store(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::store(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, name, password_hash, role, created_at, updated_at
            FROM accounts
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to find account: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to check account: {}", e)))?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| DomainError::store(format!("Failed to get existence result: {}", e)))?;
        Ok(present != 0)
    }

    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE accounts
            SET password_hash = ?, updated_at = ?
            WHERE email = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to update password: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (id, email, name, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.name)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Validation {
                    message: "Email already registered".to_string(),
                },
                other => DomainError::store(format!("Failed to create account: {}", other)),
            })?;

        Ok(account)
    }
}

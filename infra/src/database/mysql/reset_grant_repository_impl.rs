//! MySQL implementation of the ResetGrantRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use shop_core::domain::entities::reset_grant::ResetGrant;
use shop_core::errors::DomainError;
use shop_core::repositories::ResetGrantRepository;

/// MySQL implementation of ResetGrantRepository backed by `password_reset_grants`
pub struct MySqlResetGrantRepository {
    pool: MySqlPool,
}

impl MySqlResetGrantRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_grant(row: &sqlx::mysql::MySqlRow) -> Result<ResetGrant, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("Failed to get id: {}", e)))?;

        Ok(ResetGrant {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::store(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::store(format!("Failed to get email: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::store(format!("Failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::store(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl ResetGrantRepository for MySqlResetGrantRepository {
    async fn insert(&self, grant: ResetGrant) -> Result<ResetGrant, DomainError> {
        sqlx::query(
            "INSERT INTO password_reset_grants (id, email, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(grant.id.to_string())
        .bind(&grant.email)
        .bind(grant.created_at)
        .bind(grant.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::store(format!("Failed to store reset grant: {}", e)))?;

        Ok(grant)
    }

    async fn find_latest_valid(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResetGrant>, DomainError> {
        let query = r#"
            SELECT id, email, created_at, expires_at
            FROM password_reset_grants
            WHERE email = ? AND expires_at >= ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to look up reset grant: {}", e)))?;

        result.as_ref().map(Self::row_to_grant).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM password_reset_grants WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to consume reset grant: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM password_reset_grants WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::store(format!("Failed to delete expired reset grants: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}

//! MySQL implementation of the OtpRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use shop_core::domain::entities::otp_record::OtpRecord;
use shop_core::errors::DomainError;
use shop_core::repositories::OtpRepository;

/// MySQL implementation of OtpRepository backed by the `otp_codes` table
pub struct MySqlOtpRepository {
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("Failed to get id: {}", e)))?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::store(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::store(format!("Failed to get email: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::store(format!("Failed to get code: {}", e)))?,
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
impl OtpRepository for MySqlOtpRepository {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let query = r#"
            INSERT INTO otp_codes (id, email, code, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(otp_id = %record.id, error = %e, "Failed to store passcode");
                DomainError::store(format!("Failed to store passcode: {}", e))
            })?;

        Ok(record)
    }

    async fn find_latest_valid(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError> {
        // Rows sharing a created_at are not ordered by issuance; id only makes
        // the pick deterministic. Uuid and CHAR(36) order agree.
        let query = r#"
            SELECT id, email, code, created_at, expires_at
            FROM otp_codes
            WHERE email = ? AND code = ? AND expires_at >= ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(code)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to look up passcode: {}", e)))?;

        result.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to consume passcode: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to invalidate passcodes: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::store(format!("Failed to delete expired passcodes: {}", e))
            })?;

        let deleted = result.rows_affected();
        debug!(deleted = deleted, "Deleted expired passcodes");
        Ok(deleted)
    }
}

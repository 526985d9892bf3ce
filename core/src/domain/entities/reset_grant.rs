//! Reset grant entity recorded when an email's passcode is verified.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lifetime of a reset grant (10 minutes)
pub const DEFAULT_GRANT_TTL_MINUTES: i64 = 10;

/// Short-lived proof that the owner of `email` verified a passcode.
/// A password reset consumes exactly one grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetGrant {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ResetGrant {
    pub fn new(email: String, now: DateTime<Utc>, ttl_minutes: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_expiry() {
        let now = Utc::now();
        let grant = ResetGrant::new("user@example.com".to_string(), now, 10);

        assert!(!grant.is_expired_at(now));
        assert!(!grant.is_expired_at(grant.expires_at));
        assert!(grant.is_expired_at(now + Duration::minutes(11)));
    }
}

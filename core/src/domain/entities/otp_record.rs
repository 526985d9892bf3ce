//! One-time passcode entity for email-based password recovery.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the one-time passcode
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued (no leading zeros)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for one-time passcodes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A one-time passcode issued to an email address
///
/// Records are never mutated after issuance. Several records may be
/// outstanding for the same email; verification consumes the newest match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier, used to consume the record
    pub id: Uuid,

    /// Normalized email address the code was issued for
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Last instant at which the code is still accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Issues a new record with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `email` - Normalized email address
    /// * `now` - Issuance time
    /// * `expiration_minutes` - Minutes until the code expires
    pub fn new(email: String, now: DateTime<Utc>, expiration_minutes: i64) -> Self {
        Self::with_code(email, Self::generate_code(), now, expiration_minutes)
    }

    /// Builds a record around a known code
    pub fn with_code(
        email: String,
        code: String,
        now: DateTime<Utc>,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            code,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a 6-digit code uniformly over [100000, 999999]
    ///
    /// Uses OsRng (OS-provided CSPRNG); `gen_range` rejects biased samples.
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Whether a candidate has the shape of an issued code
    pub fn is_well_formed_code(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Checks if the code has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a candidate against the stored code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Whether this record accepts `candidate` for `email` at `now`
    pub fn accepts(&self, email: &str, candidate: &str, now: DateTime<Utc>) -> bool {
        self.email == email && !self.is_expired_at(now) && self.matches(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn issued_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_record() {
        let now = issued_at();
        let record = OtpRecord::new("user@example.com".to_string(), now, 10);

        assert_eq!(record.email, "user@example.com");
        assert_eq!(record.code.len(), CODE_LENGTH);
        assert_eq!(record.created_at, now);
        assert_eq!(record.expires_at, now + Duration::minutes(10));
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..1000 {
            let code = OtpRecord::generate_code();
            assert!(OtpRecord::is_well_formed_code(&code));

            let num: u32 = code.parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&num));
            assert!(!code.starts_with('0'));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: HashSet<String> = (0..100).map(|_| OtpRecord::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_well_formed_code() {
        assert!(OtpRecord::is_well_formed_code("482913"));
        assert!(!OtpRecord::is_well_formed_code("48291"));
        assert!(!OtpRecord::is_well_formed_code("4829130"));
        assert!(!OtpRecord::is_well_formed_code("48a913"));
        assert!(!OtpRecord::is_well_formed_code("４８２９１３"));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = issued_at();
        let record = OtpRecord::with_code("user@example.com".into(), "482913".into(), now, 10);

        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_accepts() {
        let now = issued_at();
        let record = OtpRecord::with_code("user@example.com".into(), "482913".into(), now, 10);

        assert!(record.accepts("user@example.com", "482913", now));
        assert!(!record.accepts("other@example.com", "482913", now));
        assert!(!record.accepts("user@example.com", "482914", now));
        assert!(!record.accepts(
            "user@example.com",
            "482913",
            now + Duration::minutes(11)
        ));
    }
}

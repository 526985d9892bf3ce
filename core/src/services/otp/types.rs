//! Types for passcode service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of issuing a passcode. The code itself is never returned.
#[derive(Debug, Clone)]
pub struct IssueOtpResult {
    /// Id of the stored record
    pub otp_id: Uuid,
    /// Normalized email the code was sent to
    pub email: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message id reported by the mail provider
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyOtpResult {
    /// Normalized email that was verified
    pub email: String,
    /// Instant the code was consumed
    pub verified_at: DateTime<Utc>,
    /// Expiry of the reset grant, when one was recorded
    pub grant_expires_at: Option<DateTime<Utc>>,
}

//! Domain entities representing core business objects.

pub mod account;
pub mod otp_record;
pub mod reset_grant;

// Re-export commonly used types
pub use account::{Account, AccountRole};
pub use otp_record::{OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES};
pub use reset_grant::{ResetGrant, DEFAULT_GRANT_TTL_MINUTES};

//! Business services containing domain logic and use cases.

pub mod clock;
pub mod otp;
pub mod password;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use otp::{
    CleanupResult, IssueOtpResult, MailServiceTrait, OtpCleanupConfig, OtpCleanupService,
    OtpService, OtpServiceConfig, VerifyOtpResult,
};
pub use password::{
    BcryptPasswordHasher, PasswordResetConfig, PasswordResetService, ResetPasswordResult,
};

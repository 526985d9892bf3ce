pub mod account;
pub mod otp;
pub mod reset_grant;

pub use account::AccountRepository;
pub use otp::OtpRepository;
pub use reset_grant::ResetGrantRepository;

/// In-memory repositories for tests and local development
pub mod mock {
    pub use super::account::MockAccountRepository;
    pub use super::otp::MockOtpRepository;
    pub use super::reset_grant::MockResetGrantRepository;
}

//! MySQL repository implementations

mod account_repository_impl;
mod otp_repository_impl;
mod reset_grant_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use otp_repository_impl::MySqlOtpRepository;
pub use reset_grant_repository_impl::MySqlResetGrantRepository;

//! Password recovery route handlers
//!
//! - `POST /otp/send` issues and mails a passcode
//! - `POST /otp/verify` consumes a passcode
//! - `POST /password/reset` overwrites the account password

pub mod reset_password;
pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use shop_core::repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
use shop_core::services::{MailServiceTrait, OtpService, PasswordResetService};

pub use reset_password::reset_password;
pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<A, O, G, M>
where
    A: AccountRepository,
    O: OtpRepository,
    G: ResetGrantRepository,
    M: MailServiceTrait,
{
    pub otp_service: Arc<OtpService<A, O, G, M>>,
    pub password_service: Arc<PasswordResetService<A, G>>,
}

impl<A, O, G, M> AppState<A, O, G, M>
where
    A: AccountRepository,
    O: OtpRepository,
    G: ResetGrantRepository,
    M: MailServiceTrait,
{
    pub fn new(
        otp_service: Arc<OtpService<A, O, G, M>>,
        password_service: Arc<PasswordResetService<A, G>>,
    ) -> Self {
        Self {
            otp_service,
            password_service,
        }
    }
}

//! # Storefront Core
//!
//! Core business logic and domain layer for storefront account recovery.
//! This crate contains domain entities, the one-time passcode and password
//! reset services, repository interfaces with in-memory implementations, and
//! the domain error type shared by the infrastructure and API layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, AccountRole, OtpRecord, ResetGrant, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
    DEFAULT_GRANT_TTL_MINUTES,
};
pub use errors::{DomainError, DomainResult, INVALID_OTP_MESSAGE};
pub use repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
pub use services::{
    Clock, IssueOtpResult, MailServiceTrait, OtpCleanupService, OtpService, OtpServiceConfig,
    PasswordResetConfig, PasswordResetService, ResetPasswordResult, SystemClock,
    VerifyOtpResult,
};

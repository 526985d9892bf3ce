//! One-time passcode service module for email-based password recovery
//!
//! This module provides the passcode workflow:
//! - Code generation, persistence and delivery by email
//! - Single-use verification with a latest-match policy
//! - Reset grant recording on successful verification
//! - Periodic removal of expired codes and grants

mod cleanup;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, OtpCleanupConfig, OtpCleanupService};
pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::MailServiceTrait;
pub use types::{IssueOtpResult, VerifyOtpResult};

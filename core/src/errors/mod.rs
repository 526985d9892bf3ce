//! Domain-specific error types and error handling.

use thiserror::Error;

/// Message returned for every failed passcode verification. Wrong code, wrong
/// email and expired code all read the same.
pub const INVALID_OTP_MESSAGE: &str = "Invalid or expired OTP";

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("{}", INVALID_OTP_MESSAGE)]
    InvalidOtp,

    #[error("Mail delivery failed: {message}")]
    DeliveryFailure { message: String },

    #[error("Storage failure: {message}")]
    StoreFailure { message: String },

    #[error("Password reset requires a verified passcode")]
    ResetNotAuthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Errors whose detail stays in the logs and never reaches the caller
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            DomainError::DeliveryFailure { .. }
                | DomainError::StoreFailure { .. }
                | DomainError::Internal { .. }
        )
    }

    pub fn account_not_found() -> Self {
        DomainError::NotFound {
            resource: "Account".to_string(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        DomainError::StoreFailure {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_otp_message_is_stable() {
        assert_eq!(DomainError::InvalidOtp.to_string(), "Invalid or expired OTP");
    }

    #[test]
    fn test_internal_classification() {
        assert!(DomainError::store("deadlock").is_internal());
        assert!(DomainError::DeliveryFailure { message: "smtp".into() }.is_internal());
        assert!(!DomainError::InvalidOtp.is_internal());
        assert!(!DomainError::account_not_found().is_internal());
        assert!(!DomainError::ResetNotAuthorized.is_internal());
    }
}

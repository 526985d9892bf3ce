use serde::{Deserialize, Serialize};
use validator::Validate;

use shop_core::errors::INVALID_OTP_MESSAGE;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// Account email; normalized by the service
    #[validate(length(min = 3, max = 254, message = "Email must be between 3 and 254 characters"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(length(min = 3, max = 254, message = "Email must be between 3 and 254 characters"))]
    pub email: String,

    /// 6-digit code; anything else is rejected as an invalid code, not a
    /// validation error
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 3, max = 254, message = "Email must be between 3 and 254 characters"))]
    pub email: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
}

impl SendOtpResponse {
    pub fn sent() -> Self {
        Self {
            message: "OTP sent to email".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
}

impl VerifyOtpResponse {
    pub fn verified() -> Self {
        Self {
            success: true,
            message: "OTP verified".to_string(),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            message: INVALID_OTP_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

impl ResetPasswordResponse {
    pub fn reset() -> Self {
        Self {
            message: "Password updated successfully".to_string(),
        }
    }
}

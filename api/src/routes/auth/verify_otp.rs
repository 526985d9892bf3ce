use actix_web::{web, HttpResponse};
use validator::Validate;

use shop_core::errors::DomainError;
use shop_core::repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
use shop_core::services::MailServiceTrait;
use shop_shared::email::mask_email;

use super::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{validation_error_response, ApiError};

/// Handler for POST /api/v1/auth/otp/verify
///
/// ```json
/// { "email": "user@example.com", "code": "482913" }
/// ```
///
/// A wrong, expired or already used code answers 400 with
/// `{ "success": false, "message": "Invalid or expired OTP" }`; the body does
/// not say which of the three happened.
pub async fn verify_otp<A, O, G, M>(
    state: web::Data<AppState<A, O, G, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    O: OtpRepository + 'static,
    G: ResetGrantRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(error = %errors, "Validation failed for verify_otp request");
        return Ok(validation_error_response(&errors));
    }

    tracing::info!(email = %mask_email(&request.email), "Processing verify_otp request");

    match state
        .otp_service
        .verify_otp(&request.email, &request.code)
        .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(VerifyOtpResponse::verified())),
        Err(DomainError::InvalidOtp) => {
            Ok(HttpResponse::BadRequest().json(VerifyOtpResponse::rejected()))
        }
        Err(error) => Err(error.into()),
    }
}

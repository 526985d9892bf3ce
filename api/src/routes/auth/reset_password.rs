use actix_web::{web, HttpResponse};
use validator::Validate;

use shop_core::repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
use shop_core::services::MailServiceTrait;
use shop_shared::email::mask_email;

use super::AppState;
use crate::dto::{ResetPasswordRequest, ResetPasswordResponse};
use crate::handlers::{validation_error_response, ApiError};

/// Handler for POST /api/v1/auth/password/reset
///
/// ```json
/// { "email": "user@example.com", "newPassword": "correct horse battery" }
/// ```
///
/// Needs a prior successful OTP verification for the same email unless
/// `reset.require_verified_otp` is off; otherwise answers 403.
pub async fn reset_password<A, O, G, M>(
    state: web::Data<AppState<A, O, G, M>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    O: OtpRepository + 'static,
    G: ResetGrantRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(error = %errors, "Validation failed for reset_password request");
        return Ok(validation_error_response(&errors));
    }

    tracing::info!(email = %mask_email(&request.email), "Processing reset_password request");

    state
        .password_service
        .reset_password(&request.email, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ResetPasswordResponse::reset()))
}

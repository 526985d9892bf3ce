use actix_web::{web, HttpResponse};
use validator::Validate;

use shop_core::repositories::{AccountRepository, OtpRepository, ResetGrantRepository};
use shop_core::services::MailServiceTrait;
use shop_shared::email::mask_email;

use super::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{validation_error_response, ApiError};

/// Handler for POST /api/v1/auth/otp/send
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// Responds 200 `{ "message": "OTP sent to email" }`, 404 for an unknown
/// account and 500 when the mail could not be handed off.
pub async fn send_otp<A, O, G, M>(
    state: web::Data<AppState<A, O, G, M>>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    O: OtpRepository + 'static,
    G: ResetGrantRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(error = %errors, "Validation failed for send_otp request");
        return Ok(validation_error_response(&errors));
    }

    tracing::info!(email = %mask_email(&request.email), "Processing send_otp request");

    let result = state.otp_service.issue_otp(&request.email).await?;

    tracing::debug!(
        email = %mask_email(&result.email),
        expires_at = %result.expires_at,
        "Passcode issued"
    );

    Ok(HttpResponse::Ok().json(SendOtpResponse::sent()))
}

//! Mapping of domain errors onto HTTP responses
//!
//! Every failure body is a `shop_shared::ErrorResponse`. Store and mail
//! failures are logged here and reported to clients only as a generic
//! internal error.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use std::collections::HashMap;
use std::fmt;
use validator::ValidationErrors;

use shop_core::errors::DomainError;
use shop_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Domain error carried out of a request handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match &self.0 {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::NotFound { .. } => {
                ErrorResponse::new(error_codes::NOT_FOUND, self.0.to_string())
            }
            DomainError::InvalidOtp => {
                ErrorResponse::new(error_codes::OTP_INVALID, self.0.to_string())
            }
            DomainError::ResetNotAuthorized => {
                ErrorResponse::new(error_codes::RESET_NOT_AUTHORIZED, self.0.to_string())
            }
            DomainError::DeliveryFailure { .. } => {
                ErrorResponse::new(error_codes::MAIL_DELIVERY_FAILED, INTERNAL_ERROR_MESSAGE)
            }
            DomainError::StoreFailure { .. } => {
                ErrorResponse::new(error_codes::DATABASE_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } | DomainError::InvalidOtp => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::ResetNotAuthorized => StatusCode::FORBIDDEN,
            DomainError::DeliveryFailure { .. }
            | DomainError::StoreFailure { .. }
            | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_internal() {
            tracing::error!(error = %self.0, "Request failed with internal error");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }
}

/// 400 response listing the failed request fields
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid request data",
    );

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// Error handler for the JSON body extractor
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected malformed JSON body");

    let mut details = HashMap::new();
    details.insert("reason".to_string(), serde_json::json!(err.to_string()));
    let response = HttpResponse::BadRequest().json(ErrorResponse::with_details(
        error_codes::BAD_REQUEST,
        "Malformed JSON request body",
        details,
    ));

    InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}

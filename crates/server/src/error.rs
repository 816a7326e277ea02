use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use callassist_common::CallAssistError;
use std::fmt;

use crate::types::ErrorResponse;

/// HTTP wrapper for request-level failures (rejected uploads, disk errors)
#[derive(Debug)]
pub struct ApiError(pub CallAssistError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CallAssistError> for ApiError {
    fn from(err: CallAssistError) -> Self {
        Self(err)
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        Self(CallAssistError::invalid_input(format!("Invalid multipart payload: {}", err)))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.0.detail(),
        })
    }
}

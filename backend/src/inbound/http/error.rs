//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type transport-agnostic while letting actix
//! handlers turn failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Replace collaborator failures with a generic message; the detail is logged.
fn redact_if_unavailable(error: &Error) -> Error {
    if error.code().is_user_facing() {
        return error.clone();
    }
    error!(
        message = error.message(),
        details = ?error.details(),
        "request failed on an unavailable collaborator"
    );
    Error::unavailable("Service temporarily unavailable, try again later")
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_unavailable(self))
    }
}

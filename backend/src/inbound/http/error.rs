//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while giving Actix handlers a
//! consistent JSON body and status code for every failure.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal failures keep their summary and cause but never structured
/// details, which may carry adapter state.
fn strip_internal_details(error: &Error) -> Error {
    if !matches!(error.code(), ErrorCode::InternalError) || error.details().is_none() {
        return error.clone();
    }
    let mut stripped = Error::internal(error.message());
    if let Some(cause) = error.cause() {
        stripped = stripped.with_cause(cause);
    }
    if let Some(id) = error.trace_id() {
        stripped = stripped.with_trace_id(id);
    }
    stripped
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(strip_internal_details(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("internal server error")
    }
}

/// `JsonConfig` error handler: malformed or oversized bodies become
/// `invalid_request` responses in the standard error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("request body must be valid JSON")
        .with_cause(err.to_string())
        .into()
}

/// `QueryConfig` error handler mirroring [`json_error_handler`].
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("query string is malformed")
        .with_cause(err.to_string())
        .into()
}

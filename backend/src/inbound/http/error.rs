//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into the documented wire contract: `{"error": msg}` for
//! single-message failures and `{"errors": [msgs]}` for validation lists.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Single-message failure body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub error: String,
}

/// Validation failure body carrying one message per violated rule.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorListBody {
    /// Messages in rule-declaration order.
    pub errors: Vec<String>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message presented for internal failures. Driver and infrastructure text
/// never reaches the client.
const INTERNAL_MESSAGE: &str = "Internal server error";

fn wire_body(err: &Error) -> serde_json::Value {
    if matches!(err.code(), ErrorCode::InternalError) {
        return serde_json::json!({ "error": INTERNAL_MESSAGE });
    }
    if err.violations().is_empty() {
        serde_json::json!({ "error": err.message() })
    } else {
        serde_json::json!({ "errors": err.violations() })
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = %self.message(), "internal error surfaced to client");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(wire_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

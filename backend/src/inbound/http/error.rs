//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn store failures into consistent JSON responses and status
//! codes.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, PollId, PollStoreError, PollValidationError};
use crate::middleware::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
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

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

pub(crate) fn validation_error(err: &PollValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

fn closed(id: PollId) -> Error {
    Error::invalid_request(format!("poll {id} is closed"))
        .with_details(json!({ "code": "poll_closed" }))
}

/// Map a store failure for endpoints addressing an existing poll by id.
///
/// Unknown polls surface as `404`.
pub(crate) fn map_store_error(err: PollStoreError) -> Error {
    match err {
        PollStoreError::Validation(err) => validation_error(&err),
        PollStoreError::NotFound { id } => unknown_poll(id),
        PollStoreError::Closed { id } => closed(id),
    }
}

/// Map a store failure for the vote endpoint.
///
/// Voting reports every rejection, including an unknown poll, as `400`.
pub(crate) fn map_vote_error(err: PollStoreError) -> Error {
    match err {
        PollStoreError::NotFound { id } => unknown_vote_target(id),
        other => map_store_error(other),
    }
}

/// Error for a vote addressed to a poll that does not exist.
pub(crate) fn unknown_vote_target(id: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("poll {id} not found"))
        .with_details(json!({ "code": "poll_not_found" }))
}

/// Error for a poll that does not exist, or a path segment that cannot name
/// one.
pub(crate) fn unknown_poll(id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("poll {id} not found"))
        .with_details(json!({ "code": "poll_not_found" }))
}

/// `JsonConfig` error handler reporting unreadable bodies in the shared
/// error format.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    Error::invalid_request(format!("malformed request body: {err}"))
        .with_details(json!({ "code": "malformed_body" }))
        .into()
}

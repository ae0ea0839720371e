//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module mirrors their wire shape so the inbound layer can document them
//! through utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "question must not be empty")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Finer-grained reason; `details.code` is stable (for example
    /// `poll_closed`).
    #[schema(value_type = Option<Object>)]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Poll`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Poll, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PollSchema {
    id: uuid::Uuid,
    #[schema(example = "Best color?")]
    question: String,
    #[schema(example = json!(["Red", "Blue"]))]
    options: Vec<String>,
    /// Vote counts, positionally parallel to `options`.
    #[schema(example = json!([0, 1]))]
    votes: Vec<u64>,
    created_at: chrono::DateTime<chrono::Utc>,
    closed: bool,
}

/// OpenAPI schema for [`crate::domain::PollSummary`]: a poll without its
/// results.
#[derive(ToSchema)]
#[schema(as = crate::domain::PollSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PollSummarySchema {
    id: uuid::Uuid,
    #[schema(example = "Best color?")]
    question: String,
    #[schema(example = json!(["Red", "Blue"]))]
    options: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    closed: bool,
}

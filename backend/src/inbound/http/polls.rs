//! Poll API handlers.
//!
//! ```text
//! POST /polls {"question":"Best color?","options":["Red","Blue"]}
//! GET /polls
//! GET /polls/{id}
//! POST /polls/{id}/vote {"optionIndex":1}
//! POST /polls/{id}/close
//! ```
//!
//! Handlers only translate between JSON and the poll ports; the store
//! notifies live subscribers itself.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Poll, PollDraft, PollId, PollSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{
    map_store_error, map_vote_error, unknown_poll, unknown_vote_target,
};
use crate::inbound::http::schemas::{ErrorSchema, PollSchema, PollSummarySchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /polls`.
///
/// Fields are optional so a missing field is reported through the same
/// validation rules as an empty one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    #[schema(example = "Best color?")]
    pub question: Option<String>,
    #[schema(example = json!(["Red", "Blue"]))]
    pub options: Option<Vec<String>>,
}

impl From<CreatePollRequest> for PollDraft {
    fn from(value: CreatePollRequest) -> Self {
        Self {
            question: value.question.unwrap_or_default(),
            options: value.options.unwrap_or_default(),
        }
    }
}

/// Request body for `POST /polls/{id}/vote`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Zero-based position of the chosen option.
    #[schema(example = 1)]
    pub option_index: Option<i64>,
}

/// Single poll wrapped as `{"poll": ...}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollResponse {
    #[schema(value_type = PollSchema)]
    pub poll: Poll,
}

/// Open polls wrapped as `{"polls": [...]}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollListResponse {
    #[schema(value_type = Vec<PollSummarySchema>)]
    pub polls: Vec<PollSummary>,
}

fn parse_option_index(payload: VoteRequest) -> Result<usize, Error> {
    let raw = payload.option_index.ok_or_else(|| {
        Error::invalid_request("optionIndex is required")
            .with_details(json!({ "field": "optionIndex", "code": "malformed_body" }))
    })?;
    usize::try_from(raw).map_err(|_| {
        Error::invalid_request(format!("option index {raw} is out of range"))
            .with_details(json!({ "field": "optionIndex", "code": "option_out_of_range" }))
    })
}

/// Create a poll.
#[utoipa::path(
    post,
    path = "/polls",
    request_body = CreatePollRequest,
    responses(
        (status = 201, description = "Poll created", body = PollResponse),
        (status = 400, description = "Invalid poll", body = ErrorSchema)
    ),
    tags = ["polls"],
    operation_id = "createPoll"
)]
#[post("/polls")]
pub async fn create_poll(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePollRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PollDraft::from(payload.into_inner());
    let poll = state.polls.create_poll(draft).map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(PollResponse { poll }))
}

/// List open polls without their results.
#[utoipa::path(
    get,
    path = "/polls",
    responses(
        (status = 200, description = "Open polls", body = PollListResponse)
    ),
    tags = ["polls"],
    operation_id = "listPolls"
)]
#[get("/polls")]
pub async fn list_polls(state: web::Data<HttpState>) -> web::Json<PollListResponse> {
    web::Json(PollListResponse {
        polls: state.polls_query.list_polls(),
    })
}

/// Fetch one poll, results included.
#[utoipa::path(
    get,
    path = "/polls/{id}",
    params(("id" = String, Path, description = "Poll identifier")),
    responses(
        (status = 200, description = "Poll", body = PollResponse),
        (status = 404, description = "Poll not found", body = ErrorSchema)
    ),
    tags = ["polls"],
    operation_id = "getPoll"
)]
#[get("/polls/{id}")]
pub async fn get_poll(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PollResponse>> {
    let raw = path.into_inner();
    let id: PollId = raw.parse().map_err(|_| unknown_poll(&raw))?;
    let poll = state.polls_query.get_poll(id).map_err(map_store_error)?;
    Ok(web::Json(PollResponse { poll }))
}

/// Cast one vote.
///
/// Every rejection is a `400`, including an unknown poll; `details.code`
/// tells the cases apart.
#[utoipa::path(
    post,
    path = "/polls/{id}/vote",
    params(("id" = String, Path, description = "Poll identifier")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated poll", body = PollResponse),
        (status = 400, description = "Vote rejected", body = ErrorSchema)
    ),
    tags = ["polls"],
    operation_id = "votePoll"
)]
#[post("/polls/{id}/vote")]
pub async fn vote(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<PollResponse>> {
    let raw = path.into_inner();
    let id: PollId = raw.parse().map_err(|_| unknown_vote_target(&raw))?;
    let option_index = parse_option_index(payload.into_inner())?;
    let poll = state.polls.vote(id, option_index).map_err(map_vote_error)?;
    Ok(web::Json(PollResponse { poll }))
}

/// Close a poll. Closing twice returns the poll unchanged.
#[utoipa::path(
    post,
    path = "/polls/{id}/close",
    params(("id" = String, Path, description = "Poll identifier")),
    responses(
        (status = 200, description = "Closed poll", body = PollResponse),
        (status = 404, description = "Poll not found", body = ErrorSchema)
    ),
    tags = ["polls"],
    operation_id = "closePoll"
)]
#[post("/polls/{id}/close")]
pub async fn close_poll(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PollResponse>> {
    let raw = path.into_inner();
    let id: PollId = raw.parse().map_err(|_| unknown_poll(&raw))?;
    let poll = state.polls.close_poll(id).map_err(map_store_error)?;
    Ok(web::Json(PollResponse { poll }))
}

#[cfg(test)]
#[path = "polls_tests.rs"]
mod tests;

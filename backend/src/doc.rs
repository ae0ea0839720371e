//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer together
//! with the schema wrappers for domain types (see
//! [`crate::inbound::http::schemas`]). The document is served by Swagger UI in
//! debug builds and printed by the `openapi-dump` binary. The live-update
//! socket is not part of the document; `GET /ws-info` describes it.

use utoipa::OpenApi;

use crate::inbound::http::health::{HealthSummary, WsInfo};
use crate::inbound::http::polls::{
    CreatePollRequest, PollListResponse, PollResponse, VoteRequest,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, PollSchema, PollSummarySchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QuickPoll API",
        description = "Create polls, vote, and close them. Changes are pushed to WebSocket clients on /polls/live."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::polls::create_poll,
        crate::inbound::http::polls::list_polls,
        crate::inbound::http::polls::get_poll,
        crate::inbound::http::polls::vote,
        crate::inbound::http::polls::close_poll,
        crate::inbound::http::health::summary,
        crate::inbound::http::health::ws_info,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PollSchema,
        PollSummarySchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreatePollRequest,
        VoteRequest,
        PollResponse,
        PollListResponse,
        HealthSummary,
        WsInfo,
    )),
    tags(
        (name = "polls", description = "Poll lifecycle and voting"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

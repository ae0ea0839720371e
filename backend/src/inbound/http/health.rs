//! Health endpoints: the service summary, liveness and readiness probes, and
//! the WebSocket usage hint.
//! Document endpoints in OpenAPI via Utoipa.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpRequest, HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;
use crate::inbound::ws::LIVE_UPDATES_PATH;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthSummary {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "Service is healthy")]
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "development")]
    pub environment: String,
}

/// Body of `GET /ws-info`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WsInfo {
    #[schema(
        example = "Connect via WebSocket to ws://localhost:3000/polls/live for real-time poll updates"
    )]
    pub info: String,
}

/// Service summary for humans and simple uptime checks.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Service is up", body = HealthSummary))
)]
#[get("/")]
pub async fn summary(state: web::Data<HttpState>) -> web::Json<HealthSummary> {
    web::Json(HealthSummary {
        status: "ok",
        message: "Service is healthy",
        timestamp: Utc::now(),
        environment: state.environment.clone(),
    })
}

/// Explain where to open the live-update socket.
#[utoipa::path(
    get,
    path = "/ws-info",
    tags = ["health"],
    responses((status = 200, description = "WebSocket usage", body = WsInfo))
)]
#[get("/ws-info")]
pub async fn ws_info(req: HttpRequest) -> web::Json<WsInfo> {
    let connection = req.connection_info();
    web::Json(WsInfo {
        info: format!(
            "Connect via WebSocket to ws://{}{LIVE_UPDATES_PATH} for real-time poll updates",
            connection.host()
        ),
    })
}

/// Readiness probe. Return 200 when the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// The server marks itself unhealthy as soon as a shutdown signal arrives.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Register the health and usage endpoints.
///
/// Expects [`HealthState`] and [`HttpState`] to be present as app data.
pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(summary)
        .service(ws_info)
        .service(ready)
        .service(live);
}

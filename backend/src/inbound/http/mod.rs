//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod polls;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

/// JSON extractor configuration reporting unreadable bodies in the shared
/// error format.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}

/// Register the poll REST endpoints.
///
/// Expects [`state::HttpState`] to be present as app data.
pub fn poll_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(polls::create_poll)
        .service(polls::list_polls)
        .service(polls::get_poll)
        .service(polls::vote)
        .service(polls::close_poll);
}

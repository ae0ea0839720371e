//! Shared helpers for integration tests.
//!
//! Integration tests compile as separate crates, so the application is
//! assembled here the same way the binary assembles it.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpServer, dev::ServerHandle, test, web};
use quickpoll::Trace;
use quickpoll::domain::PollStore;
use quickpoll::inbound::http::health::{HealthState, health_routes};
use quickpoll::inbound::http::poll_routes;
use quickpoll::inbound::http::state::HttpState;
use quickpoll::inbound::ws;
use quickpoll::inbound::ws::state::WsState;
use quickpoll::test_support::FixedClock;

/// Fresh store stamped with the fixture clock.
pub fn store() -> Arc<PollStore> {
    Arc::new(PollStore::new(Arc::new(FixedClock::fixture())))
}

fn configure(store: Arc<PollStore>) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        let health = HealthState::new();
        health.mark_ready();
        cfg.app_data(web::Data::new(health))
            .app_data(web::Data::new(HttpState::new(
                store.clone(),
                store.clone(),
                "test",
            )))
            .app_data(web::Data::new(WsState::new(store.clone())))
            .service(ws::ws_entry)
            .configure(poll_routes)
            .configure(health_routes);
    }
}

/// In-process service for request/response tests.
pub async fn init_app(
    store: Arc<PollStore>,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(App::new().wrap(Trace).configure(configure(store))).await
}

/// A real listener on an ephemeral port.
pub struct LiveServer {
    pub base_url: String,
    pub ws_url: String,
    pub handle: ServerHandle,
}

/// Start the full application on `127.0.0.1:0`.
pub fn spawn_server(store: Arc<PollStore>) -> LiveServer {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let configure = configure(store);
    let server = HttpServer::new(move || App::new().wrap(Trace).configure(configure.clone()))
        .listen(listener)
        .expect("bind test server")
        .disable_signals()
        .workers(2)
        .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    LiveServer {
        base_url: format!("http://{addr}"),
        ws_url: format!("ws://{addr}/polls/live"),
        handle,
    }
}

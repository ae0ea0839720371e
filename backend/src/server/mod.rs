//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use quickpoll::Trace;
#[cfg(debug_assertions)]
use quickpoll::doc::ApiDoc;
use quickpoll::domain::PollStore;
use quickpoll::inbound::http::health::{HealthState, health_routes};
use quickpoll::inbound::http::poll_routes;
use quickpoll::inbound::http::state::HttpState;
use quickpoll::inbound::ws;
use quickpoll::inbound::ws::state::WsState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        ws_state,
    } = deps;

    // The socket route must precede `GET /polls/{id}`, which would otherwise
    // claim `/polls/live`.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .wrap(Trace)
        .service(ws::ws_entry)
        .configure(poll_routes)
        .configure(health_routes);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Wait for `signal`, fail the liveness probe, then stop the server gracefully.
///
/// Signal handling is disabled on the server built by [`create_server`], so
/// this is what ends the process on shutdown.
pub async fn drain_on<F>(signal: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested, draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = actix_web::rt::signal::ctrl_c().await {
            warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use actix_web::rt::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Construct an Actix HTTP server backed by a fresh poll store.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let store = Arc::new(PollStore::new(Arc::new(DefaultClock)));
    let http_state = web::Data::new(HttpState::new(
        store.clone(),
        store.clone(),
        config.environment,
    ));
    let ws_state = web::Data::new(WsState::new(store));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            ws_state: ws_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .shutdown_timeout(5)
    .disable_signals()
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Shutdown sequencing for the assembled server.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[actix_rt::test]
    async fn drain_marks_service_unhealthy_and_stops_server() {
        let health_state = web::Data::new(HealthState::new());
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("addr"), "test");
        let server = create_server(health_state.clone(), config).expect("server binds");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        assert!(health_state.is_ready());
        assert!(health_state.is_alive());

        drain_on(async {}, health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}

//! Service entry-point: loads settings, initialises logging, and runs the
//! HTTP server until a shutdown signal arrives.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use quickpoll::inbound::http::health::HealthState;
use quickpoll::settings::ServerSettings;
use server::{ServerConfig, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load_from_iter(std::env::args_os()).map_err(std::io::Error::other)?;
    let config = ServerConfig::from(&settings);
    info!(
        bind_addr = %config.bind_addr(),
        environment = settings.environment(),
        "starting poll service"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await?;
    info!("poll service stopped");
    Ok(())
}

//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `QUICKPOLL_*` environment variables, or an
//! optional configuration file; unset values fall back to the defaults below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENVIRONMENT: &str = "development";

/// Listener and deployment settings for the poll service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QUICKPOLL")]
pub struct ServerSettings {
    /// Address to bind the HTTP listener to.
    #[ortho_config(default = DEFAULT_HOST)]
    pub host: IpAddr,
    /// Port to bind the HTTP listener to.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Deployment label reported by `GET /`.
    #[ortho_config(default = DEFAULT_ENVIRONMENT.to_owned())]
    pub environment: String,
}

impl ServerSettings {
    /// Return the socket address to listen on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Return the deployment label.
    pub fn environment(&self) -> &str {
        &self.environment
    }
}

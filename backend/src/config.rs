//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MARINA_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence order.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Runtime settings for the marina service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARINA")]
pub struct MarinaSettings {
    /// Address the HTTP listener binds to.
    #[ortho_config(default = DEFAULT_HOST)]
    pub host: IpAddr,
    /// Port the HTTP listener binds to.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Public base URL used to render `self` links.
    #[ortho_config(default = DEFAULT_BASE_URL.to_owned())]
    pub base_url: String,
    /// PostgreSQL connection string. Without one, entities live in memory.
    pub database_url: Option<String>,
}

impl MarinaSettings {
    /// Socket address to bind; `0.0.0.0:8080` unless overridden.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Base URL for rendered links.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured database URL, if persistence is enabled.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

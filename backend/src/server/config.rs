//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use marina::inbound::http::state::ResourceLinks;
use marina::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) links: ResourceLinks,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` that renders
    /// links under `base_url`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, base_url: &str) -> Self {
        Self {
            bind_addr,
            links: ResourceLinks::new(base_url),
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, entities are persisted in PostgreSQL; otherwise the
    /// server keeps them in memory for the lifetime of the process.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

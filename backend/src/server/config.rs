//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use users_api::domain::ports::UserStore;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<dyn UserStore>,
    pub(crate) swagger: bool,
}

impl ServerConfig {
    /// Serve `store` on `bind_addr`, with Swagger UI enabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: Arc<dyn UserStore>) -> Self {
        Self {
            bind_addr,
            store,
            swagger: true,
        }
    }

    /// Toggle Swagger UI and the OpenAPI JSON route.
    #[must_use]
    pub fn with_swagger(mut self, enabled: bool) -> Self {
        self.swagger = enabled;
        self
    }

    /// Socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use swissparcel::domain::ports::ParcelRepository;
use swissparcel::inbound::http::api_key::ApiKey;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) api_key: ApiKey,
    pub(crate) repository: Arc<dyn ParcelRepository>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration around the selected repository.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        api_key: ApiKey,
        repository: Arc<dyn ParcelRepository>,
    ) -> Self {
        Self {
            bind_addr,
            api_key,
            repository,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

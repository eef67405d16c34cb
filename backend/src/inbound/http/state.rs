//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ParcelCommand, ParcelQuery};

use super::api_key::ApiKey;

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Read-side parcel use-cases.
    pub parcels: Arc<dyn ParcelQuery>,
    /// Write-side parcel use-cases.
    pub parcel_commands: Arc<dyn ParcelCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side parcel use-cases.
    pub parcels: Arc<dyn ParcelQuery>,
    /// Write-side parcel use-cases.
    pub parcel_commands: Arc<dyn ParcelCommand>,
    /// Shared secret guarding parcel routes.
    pub api_key: ApiKey,
}

impl HttpState {
    /// Construct state from a ports bundle and the configured API key.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use swissparcel::domain::ParcelService;
    /// use swissparcel::inbound::http::api_key::ApiKey;
    /// use swissparcel::inbound::http::state::{HttpState, HttpStatePorts};
    /// use swissparcel::outbound::InMemoryParcelRepository;
    ///
    /// let service = Arc::new(ParcelService::new(Arc::new(InMemoryParcelRepository::new())));
    /// let ports = HttpStatePorts {
    ///     parcels: service.clone(),
    ///     parcel_commands: service,
    /// };
    /// let state = HttpState::new(ports, ApiKey::new("SUPER_ALEX").expect("key"));
    /// assert!(state.api_key.matches("SUPER_ALEX"));
    /// ```
    pub fn new(ports: HttpStatePorts, api_key: ApiKey) -> Self {
        let HttpStatePorts {
            parcels,
            parcel_commands,
        } = ports;
        Self {
            parcels,
            parcel_commands,
            api_key,
        }
    }
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{Parcel, ParcelInput, ParcelService};
use crate::outbound::InMemoryParcelRepository;

use super::api_key::ApiKey;
use super::state::{HttpState, HttpStatePorts};

/// Key accepted by state built with [`memory_state`].
pub const TEST_API_KEY: &str = "test-api-key";

/// Build HTTP state over an in-memory repository seeded with `parcels`.
pub fn memory_state(parcels: Vec<Parcel>) -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryParcelRepository::with_parcels(parcels));
    let service = Arc::new(ParcelService::new(repository));
    let ports = HttpStatePorts {
        parcels: service.clone(),
        parcel_commands: service,
    };
    let api_key = ApiKey::new(TEST_API_KEY).expect("test key is non-empty");
    web::Data::new(HttpState::new(ports, api_key))
}

/// Build a valid parcel for handler tests.
pub fn parcel(id: &str, canton: &str, area_m2: f64, buildable: bool) -> Parcel {
    Parcel::try_new(ParcelInput {
        id: id.to_owned(),
        canton: canton.to_owned(),
        municipality: None,
        area_m2,
        zoning: if buildable { "buildable" } else { "agricultural" }.to_owned(),
        is_buildable: buildable,
        estimated_value_chf: None,
    })
    .expect("valid test parcel")
}

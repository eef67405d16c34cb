//! Domain primitives, services and ports.
//!
//! Purpose: define the parcel entity and the use cases built on it, with no
//! knowledge of HTTP or SQL. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Parcel`], [`ParcelId`], [`ParcelInput`]: validated parcel entity.
//! - [`PageRequest`], [`ParcelFilter`]: listing window and search filter.
//! - [`ParcelStats`]: collection aggregates.
//! - [`insights`]: derived, read-only parcel metrics.
//! - [`ParcelService`]: implementation of the parcel driving ports.
//! - [`Error`], [`ErrorCode`]: transport-agnostic error payload.
//! - [`TraceId`]: per-request correlation id.

pub mod error;
pub mod example_data;
pub mod insights;
pub mod listing;
pub mod parcel;
pub mod parcel_service;
pub mod parcel_stats;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::example_data::{
    ExampleDataSeedOutcome, ExampleDataSeedingError, ExampleParcelSeeder, example_parcels,
};
pub use self::listing::{DEFAULT_PAGE_LIMIT, PageRequest, ParcelFilter};
pub use self::parcel::{Parcel, ParcelId, ParcelInput, ParcelValidationError};
pub use self::parcel_service::ParcelService;
pub use self::parcel_stats::{ParcelStats, ParcelTally};
pub use self::trace_id::TraceId;


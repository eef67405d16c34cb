//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod parcel_command;
mod parcel_query;
mod parcel_repository;

#[cfg(test)]
pub use parcel_command::MockParcelCommand;
pub use parcel_command::ParcelCommand;
#[cfg(test)]
pub use parcel_query::MockParcelQuery;
pub use parcel_query::ParcelQuery;
#[cfg(test)]
pub use parcel_repository::MockParcelRepository;
pub use parcel_repository::{ParcelRepository, ParcelRepositoryError};

//! Driving port for read-only parcel use cases.

use async_trait::async_trait;

use crate::domain::{Error, PageRequest, Parcel, ParcelFilter, ParcelId, ParcelStats};

/// Read side of the parcel API, consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelQuery: Send + Sync {
    /// List one page of parcels in natural order.
    async fn list(&self, page: PageRequest) -> Result<Vec<Parcel>, Error>;

    /// Fetch a parcel, failing with `not_found` when it is absent.
    async fn get(&self, id: &ParcelId) -> Result<Parcel, Error>;

    /// Return every parcel matching `filter`.
    async fn search(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, Error>;

    /// Aggregate statistics over the collection.
    async fn stats(&self) -> Result<ParcelStats, Error>;
}

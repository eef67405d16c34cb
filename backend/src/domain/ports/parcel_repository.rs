//! Driven port for parcel storage.
//!
//! Two adapters implement [`ParcelRepository`]: an in-memory store used for
//! development and tests, and a Diesel/PostgreSQL store. Both honour the same
//! contract so the service layer never needs to know which one is wired in.

use async_trait::async_trait;

use crate::domain::{PageRequest, Parcel, ParcelFilter, ParcelId, ParcelStats};

use super::define_port_error;

define_port_error! {
    /// Errors raised by parcel repository adapters.
    pub enum ParcelRepositoryError {
        /// No parcel is stored under the requested id.
        NotFound { id: String } => "parcel {id} not found",
        /// A parcel with the same id already exists.
        DuplicateId { id: String } => "parcel {id} already exists",
        /// The backing store could not be reached.
        Connection { message: String } =>
            "parcel repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "parcel repository query failed: {message}",
    }
}

/// Storage contract for parcels.
///
/// Every method is atomic with respect to other calls on the same adapter.
/// "Natural order" is insertion order; listings and searches both use it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelRepository: Send + Sync {
    /// Return the window of parcels selected by `page`.
    ///
    /// A `skip` past the end yields an empty vector.
    async fn list(&self, page: PageRequest) -> Result<Vec<Parcel>, ParcelRepositoryError>;

    /// Fetch a parcel by id.
    async fn find_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, ParcelRepositoryError>;

    /// Return every parcel matching `filter`, in natural order.
    async fn search(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, ParcelRepositoryError>;

    /// Aggregate statistics over the whole collection.
    async fn stats(&self) -> Result<ParcelStats, ParcelRepositoryError>;

    /// Insert a new parcel.
    ///
    /// Fails with [`ParcelRepositoryError::DuplicateId`] and leaves the
    /// collection untouched when the id is taken.
    async fn create(&self, parcel: &Parcel) -> Result<Parcel, ParcelRepositoryError>;

    /// Replace every attribute of the parcel stored under `id`.
    ///
    /// The stored id is kept even if `parcel` carries a different one.
    async fn update(&self, id: &ParcelId, parcel: &Parcel)
    -> Result<Parcel, ParcelRepositoryError>;

    /// Remove the parcel stored under `id`.
    async fn delete(&self, id: &ParcelId) -> Result<(), ParcelRepositoryError>;
}

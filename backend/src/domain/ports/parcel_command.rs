//! Driving port for parcel mutations.
//!
//! Inputs arrive already validated as [`Parcel`] values; this port only
//! reports conflicts with the stored collection.

use async_trait::async_trait;

use crate::domain::{Error, Parcel, ParcelId};

/// Write side of the parcel API, consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelCommand: Send + Sync {
    /// Store a new parcel.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` with `details.code = "duplicate_id"` when the
    /// id is already taken.
    async fn create(&self, parcel: Parcel) -> Result<Parcel, Error>;

    /// Replace the attributes of an existing parcel, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when no parcel is stored under `id`.
    async fn update(&self, id: &ParcelId, parcel: Parcel) -> Result<Parcel, Error>;

    /// Remove a parcel.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when no parcel is stored under `id`.
    async fn delete(&self, id: &ParcelId) -> Result<(), Error>;
}

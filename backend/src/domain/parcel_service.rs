//! Parcel domain service.
//!
//! [`ParcelService`] implements the [`ParcelQuery`] and [`ParcelCommand`]
//! driving ports on top of any [`ParcelRepository`], translating repository
//! failures into domain [`Error`] values with stable detail codes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{ParcelCommand, ParcelQuery, ParcelRepository, ParcelRepositoryError};
use crate::domain::{Error, PageRequest, Parcel, ParcelFilter, ParcelId, ParcelStats};

/// Parcel service implementing the driving ports.
pub struct ParcelService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for ParcelService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> ParcelService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn not_found(id: &str) -> Error {
    Error::not_found(format!("parcel {id} not found")).with_details(json!({
        "id": id,
        "code": "parcel_not_found",
    }))
}

fn map_repository_error(error: ParcelRepositoryError) -> Error {
    match error {
        ParcelRepositoryError::NotFound { id } => not_found(&id),
        ParcelRepositoryError::DuplicateId { id } => {
            Error::invalid_request(format!("parcel {id} already exists")).with_details(json!({
                "field": "id",
                "code": "duplicate_id",
            }))
        }
        ParcelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("parcel repository unavailable: {message}"))
        }
        ParcelRepositoryError::Query { message } => {
            Error::internal(format!("parcel repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> ParcelQuery for ParcelService<R>
where
    R: ParcelRepository + ?Sized,
{
    async fn list(&self, page: PageRequest) -> Result<Vec<Parcel>, Error> {
        self.repository
            .list(page)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &ParcelId) -> Result<Parcel, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id.as_ref()))
    }

    async fn search(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, Error> {
        self.repository
            .search(filter)
            .await
            .map_err(map_repository_error)
    }

    async fn stats(&self) -> Result<ParcelStats, Error> {
        self.repository.stats().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> ParcelCommand for ParcelService<R>
where
    R: ParcelRepository + ?Sized,
{
    async fn create(&self, parcel: Parcel) -> Result<Parcel, Error> {
        let created = self
            .repository
            .create(&parcel)
            .await
            .map_err(map_repository_error)?;
        info!(parcel_id = %created.id(), "parcel created");
        Ok(created)
    }

    async fn update(&self, id: &ParcelId, parcel: Parcel) -> Result<Parcel, Error> {
        let replacement = parcel.with_id(id.clone());
        let updated = self
            .repository
            .update(id, &replacement)
            .await
            .map_err(map_repository_error)?;
        info!(parcel_id = %id, "parcel updated");
        Ok(updated)
    }

    async fn delete(&self, id: &ParcelId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(parcel_id = %id, "parcel deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "parcel_service_tests.rs"]
mod tests;

//! Example parcel seeding.
//!
//! Loads the two demonstration parcels into an empty or partially seeded
//! repository. Ids that already exist are skipped, so repeated runs converge
//! on the same collection.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{ParcelRepository, ParcelRepositoryError};
use crate::domain::{Parcel, ParcelInput, ParcelValidationError};

/// Result of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Parcels inserted by this run.
    pub inserted: usize,
    /// Parcels skipped because their id was already taken.
    pub skipped: usize,
}

/// Errors raised while seeding example parcels.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// A fixture failed validation.
    #[error("example parcel failed validation: {0}")]
    Invalid(#[from] ParcelValidationError),
    /// The repository rejected an insert for a reason other than a duplicate.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] ParcelRepositoryError),
}

fn example_inputs() -> [ParcelInput; 2] {
    [
        ParcelInput {
            id: "12345".to_owned(),
            canton: "FR".to_owned(),
            municipality: Some("Exampleville".to_owned()),
            area_m2: 1200.0,
            zoning: "buildable".to_owned(),
            is_buildable: true,
            estimated_value_chf: Some(250_000.0),
        },
        ParcelInput {
            id: "67890".to_owned(),
            canton: "FR".to_owned(),
            municipality: Some("Sampletown".to_owned()),
            area_m2: 800.0,
            zoning: "agricultural".to_owned(),
            is_buildable: false,
            estimated_value_chf: None,
        },
    ]
}

/// The demonstration parcels, validated.
///
/// # Errors
///
/// Returns [`ParcelValidationError`] if a fixture is malformed.
pub fn example_parcels() -> Result<Vec<Parcel>, ParcelValidationError> {
    example_inputs().into_iter().map(Parcel::try_new).collect()
}

/// Inserts the example parcels through a [`ParcelRepository`].
pub struct ExampleParcelSeeder<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> ExampleParcelSeeder<R> {
    /// Create a seeder writing to `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ExampleParcelSeeder<R>
where
    R: ParcelRepository + ?Sized,
{
    /// Insert every example parcel whose id is still free.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] when a fixture is invalid or the
    /// repository fails with anything other than a duplicate id.
    pub async fn seed(&self) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let mut outcome = ExampleDataSeedOutcome {
            inserted: 0,
            skipped: 0,
        };
        for parcel in example_parcels()? {
            match self.repository.create(&parcel).await {
                Ok(_) => outcome.inserted += 1,
                Err(ParcelRepositoryError::DuplicateId { id }) => {
                    debug!(parcel_id = %id, "example parcel already present");
                    outcome.skipped += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(outcome)
    }
}

//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence module; the repository converts
//! them to and from domain [`Parcel`] values.

use diesel::prelude::*;

use crate::domain::{Parcel, ParcelInput, ParcelValidationError};

use super::schema::parcels;

/// Row struct for reading from the parcels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parcels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ParcelRow {
    pub id: String,
    pub canton: String,
    pub municipality: Option<String>,
    pub area_m2: f64,
    pub zoning: String,
    pub is_buildable: bool,
    pub estimated_value_chf: Option<f64>,
}

impl TryFrom<ParcelRow> for Parcel {
    type Error = ParcelValidationError;

    fn try_from(row: ParcelRow) -> Result<Self, Self::Error> {
        Self::try_new(ParcelInput {
            id: row.id,
            canton: row.canton,
            municipality: row.municipality,
            area_m2: row.area_m2,
            zoning: row.zoning,
            is_buildable: row.is_buildable,
            estimated_value_chf: row.estimated_value_chf,
        })
    }
}

/// Insertable struct for creating parcel records. `created_at` uses the
/// column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parcels)]
pub(crate) struct NewParcelRow<'a> {
    pub id: &'a str,
    pub canton: &'a str,
    pub municipality: Option<&'a str>,
    pub area_m2: f64,
    pub zoning: &'a str,
    pub is_buildable: bool,
    pub estimated_value_chf: Option<f64>,
}

impl<'a> From<&'a Parcel> for NewParcelRow<'a> {
    fn from(parcel: &'a Parcel) -> Self {
        Self {
            id: parcel.id().as_str(),
            canton: parcel.canton(),
            municipality: parcel.municipality(),
            area_m2: parcel.area_m2(),
            zoning: parcel.zoning(),
            is_buildable: parcel.is_buildable(),
            estimated_value_chf: parcel.estimated_value_chf(),
        }
    }
}

/// Changeset replacing every mutable column.
///
/// `treat_none_as_null` makes a cleared municipality or estimate write `NULL`
/// instead of leaving the previous value in place.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = parcels)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ParcelChangeset<'a> {
    pub canton: &'a str,
    pub municipality: Option<&'a str>,
    pub area_m2: f64,
    pub zoning: &'a str,
    pub is_buildable: bool,
    pub estimated_value_chf: Option<f64>,
}

impl<'a> From<&'a Parcel> for ParcelChangeset<'a> {
    fn from(parcel: &'a Parcel) -> Self {
        Self {
            canton: parcel.canton(),
            municipality: parcel.municipality(),
            area_m2: parcel.area_m2(),
            zoning: parcel.zoning(),
            is_buildable: parcel.is_buildable(),
            estimated_value_chf: parcel.estimated_value_chf(),
        }
    }
}

//! Parcel entity and its validation rules.
//!
//! A [`Parcel`] can only be built through [`Parcel::try_new`], so every value
//! that reaches a repository already satisfies the invariants below:
//!
//! - `id` is non-empty and carries no surrounding whitespace.
//! - `canton` and `zoning` are non-empty.
//! - `area_m2` is finite and strictly positive.
//! - `estimated_value_chf`, when present, is finite and non-negative.
//!
//! `zoning` and `is_buildable` are deliberately independent: an
//! `"agricultural"` parcel may still be flagged buildable.

use std::fmt;

/// Validation errors returned when constructing parcel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParcelValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier had leading or trailing whitespace.
    PaddedId,
    /// The canton code was empty.
    EmptyCanton,
    /// The zoning category was empty.
    EmptyZoning,
    /// The area was zero, negative or not a number.
    InvalidArea,
    /// The estimated value was negative or not a finite number.
    InvalidEstimatedValue,
}

impl ParcelValidationError {
    /// Name of the payload field that failed validation.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyId | Self::PaddedId => "id",
            Self::EmptyCanton => "canton",
            Self::EmptyZoning => "zoning",
            Self::InvalidArea => "area_m2",
            Self::InvalidEstimatedValue => "estimated_value_chf",
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::PaddedId => "padded_id",
            Self::EmptyCanton => "empty_canton",
            Self::EmptyZoning => "empty_zoning",
            Self::InvalidArea => "invalid_area",
            Self::InvalidEstimatedValue => "invalid_estimated_value",
        }
    }
}

impl fmt::Display for ParcelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "parcel id must not be empty"),
            Self::PaddedId => write!(f, "parcel id must not start or end with whitespace"),
            Self::EmptyCanton => write!(f, "canton must not be empty"),
            Self::EmptyZoning => write!(f, "zoning must not be empty"),
            Self::InvalidArea => write!(f, "area_m2 must be a number greater than zero"),
            Self::InvalidEstimatedValue => {
                write!(f, "estimated_value_chf must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for ParcelValidationError {}

/// Primary key of a parcel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParcelId(String);

impl ParcelId {
    /// Validate and construct an identifier.
    ///
    /// # Examples
    /// ```
    /// use swissparcel::domain::ParcelId;
    ///
    /// let id = ParcelId::new("2222-A").expect("valid id");
    /// assert_eq!(id.as_ref(), "2222-A");
    /// assert!(ParcelId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, ParcelValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParcelValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ParcelValidationError::PaddedId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ParcelId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ParcelId> for String {
    fn from(value: ParcelId) -> Self {
        value.0
    }
}

/// Unvalidated parcel attributes as supplied by a caller or a storage row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelInput {
    /// Requested primary key.
    pub id: String,
    /// Canton short code, e.g. `FR`.
    pub canton: String,
    /// Municipality name, when known.
    pub municipality: Option<String>,
    /// Surface in square metres.
    pub area_m2: f64,
    /// Free-form zoning category.
    pub zoning: String,
    /// Whether construction is permitted.
    pub is_buildable: bool,
    /// Caller-supplied valuation in Swiss francs.
    pub estimated_value_chf: Option<f64>,
}

/// A validated land parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    id: ParcelId,
    canton: String,
    municipality: Option<String>,
    area_m2: f64,
    zoning: String,
    is_buildable: bool,
    estimated_value_chf: Option<f64>,
}

impl Parcel {
    /// Validate `input` and build a parcel.
    ///
    /// # Examples
    /// ```
    /// use swissparcel::domain::{Parcel, ParcelInput, ParcelValidationError};
    ///
    /// let input = ParcelInput {
    ///     id: "2222-A".into(),
    ///     canton: "ZH".into(),
    ///     municipality: None,
    ///     area_m2: 500.5,
    ///     zoning: "buildable".into(),
    ///     is_buildable: true,
    ///     estimated_value_chf: None,
    /// };
    /// let parcel = Parcel::try_new(input.clone()).expect("valid parcel");
    /// assert_eq!(parcel.canton(), "ZH");
    ///
    /// let flat = ParcelInput { area_m2: 0.0, ..input };
    /// assert_eq!(Parcel::try_new(flat), Err(ParcelValidationError::InvalidArea));
    /// ```
    pub fn try_new(input: ParcelInput) -> Result<Self, ParcelValidationError> {
        let ParcelInput {
            id,
            canton,
            municipality,
            area_m2,
            zoning,
            is_buildable,
            estimated_value_chf,
        } = input;

        let id = ParcelId::new(id)?;
        if canton.trim().is_empty() {
            return Err(ParcelValidationError::EmptyCanton);
        }
        if zoning.trim().is_empty() {
            return Err(ParcelValidationError::EmptyZoning);
        }
        if !(area_m2.is_finite() && area_m2 > 0.0) {
            return Err(ParcelValidationError::InvalidArea);
        }
        if estimated_value_chf.is_some_and(|value| !(value.is_finite() && value >= 0.0)) {
            return Err(ParcelValidationError::InvalidEstimatedValue);
        }

        Ok(Self {
            id,
            canton,
            municipality: municipality.filter(|name| !name.trim().is_empty()),
            area_m2,
            zoning,
            is_buildable,
            estimated_value_chf,
        })
    }

    /// Replace the identifier, keeping every other attribute.
    ///
    /// Updates use this so the stored id always wins over the payload's.
    #[must_use]
    pub fn with_id(mut self, id: ParcelId) -> Self {
        self.id = id;
        self
    }

    /// Primary key.
    #[must_use]
    pub const fn id(&self) -> &ParcelId {
        &self.id
    }

    /// Canton short code as stored.
    #[must_use]
    pub fn canton(&self) -> &str {
        &self.canton
    }

    /// Municipality name, if recorded.
    #[must_use]
    pub fn municipality(&self) -> Option<&str> {
        self.municipality.as_deref()
    }

    /// Surface in square metres.
    #[must_use]
    pub const fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Zoning category.
    #[must_use]
    pub fn zoning(&self) -> &str {
        &self.zoning
    }

    /// Whether construction is permitted.
    #[must_use]
    pub const fn is_buildable(&self) -> bool {
        self.is_buildable
    }

    /// Caller-supplied valuation in Swiss francs.
    #[must_use]
    pub const fn estimated_value_chf(&self) -> Option<f64> {
        self.estimated_value_chf
    }
}

impl From<Parcel> for ParcelInput {
    fn from(value: Parcel) -> Self {
        Self {
            id: value.id.into(),
            canton: value.canton,
            municipality: value.municipality,
            area_m2: value.area_m2,
            zoning: value.zoning,
            is_buildable: value.is_buildable,
            estimated_value_chf: value.estimated_value_chf,
        }
    }
}

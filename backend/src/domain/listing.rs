//! Pagination window and search filter for parcel listings.

use super::Parcel;

/// Default number of parcels returned when a caller omits `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Offset window over the natural ordering of the collection.
///
/// # Examples
/// ```
/// use swissparcel::domain::{PageRequest, DEFAULT_PAGE_LIMIT};
///
/// let page = PageRequest::new(Some(20), None);
/// assert_eq!(page.skip(), 20);
/// assert_eq!(page.limit(), DEFAULT_PAGE_LIMIT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: usize,
    limit: usize,
}

impl PageRequest {
    /// Build a window, defaulting to the first page of ten.
    #[must_use]
    pub fn new(skip: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }

    /// Number of leading records to pass over.
    #[must_use]
    pub const fn skip(&self) -> usize {
        self.skip
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Apply the window to an ordered sequence.
    ///
    /// Skipping past the end yields an empty result rather than an error.
    pub fn apply<I>(&self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Optional constraints for parcel search. Omitted fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParcelFilter {
    /// Canton code, compared case-insensitively.
    pub canton: Option<String>,
    /// Required buildable flag.
    pub buildable: Option<bool>,
}

impl ParcelFilter {
    /// Whether `parcel` satisfies every supplied constraint.
    #[must_use]
    pub fn matches(&self, parcel: &Parcel) -> bool {
        let canton_ok = self
            .canton
            .as_deref()
            .is_none_or(|canton| parcel.canton().to_lowercase() == canton.to_lowercase());
        let buildable_ok = self
            .buildable
            .is_none_or(|buildable| parcel.is_buildable() == buildable);
        canton_ok && buildable_ok
    }
}

//! Aggregate statistics over the whole parcel collection.

use serde::Serialize;
use utoipa::ToSchema;

/// Raw counters gathered by a repository in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParcelTally {
    /// Number of stored parcels.
    pub total: u64,
    /// Number of parcels flagged buildable.
    pub buildable: u64,
    /// Sum of every parcel's area in square metres.
    pub total_area_m2: f64,
}

/// Presentation-ready collection statistics.
///
/// Percentages and averages are pre-formatted with two decimals so every
/// adapter reports identical strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParcelStats {
    /// Number of stored parcels.
    pub total_parcels: u64,
    /// Share of buildable parcels, e.g. `"50.00%"`.
    pub buildable_percentage: String,
    /// Mean area in square metres, e.g. `"1000.00"`.
    pub average_area_m2: String,
}

impl ParcelStats {
    /// Derive statistics from raw counters.
    ///
    /// An empty collection reports zeroes instead of dividing by zero.
    ///
    /// # Examples
    /// ```
    /// use swissparcel::domain::{ParcelStats, ParcelTally};
    ///
    /// let stats = ParcelStats::from_tally(ParcelTally {
    ///     total: 2,
    ///     buildable: 1,
    ///     total_area_m2: 2000.0,
    /// });
    /// assert_eq!(stats.buildable_percentage, "50.00%");
    /// assert_eq!(stats.average_area_m2, "1000.00");
    /// ```
    #[must_use]
    pub fn from_tally(tally: ParcelTally) -> Self {
        if tally.total == 0 {
            return Self::empty();
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "parcel counts stay far below 2^52"
        )]
        let (total, buildable) = (tally.total as f64, tally.buildable as f64);

        Self {
            total_parcels: tally.total,
            buildable_percentage: format!("{:.2}%", buildable / total * 100.0),
            average_area_m2: format!("{:.2}", tally.total_area_m2 / total),
        }
    }

    /// Statistics for a collection with no parcels.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_parcels: 0,
            buildable_percentage: "0.00%".to_owned(),
            average_area_m2: "0.00".to_owned(),
        }
    }
}

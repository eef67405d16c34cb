//! Derived, read-only insights about a single parcel.
//!
//! Every function here is pure: it reads a resolved [`Parcel`] and returns a
//! value computed from fixed formulas. Callers resolve the parcel first, so
//! a missing parcel is reported as not found before any of these run.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::Parcel;

const BASE_SCORE: u32 = 75;
const BUILDABLE_BONUS: u32 = 15;
const LARGE_PARCEL_BONUS: u32 = 10;
/// Parcels strictly larger than this many square metres count as large.
pub const LARGE_PARCEL_THRESHOLD_M2: f64 = 1000.0;

const LAND_RATE_CHF_PER_M2: f64 = 200.0;
const BUILDABLE_PREMIUM_CHF_PER_M2: f64 = 800.0;
const AGRICULTURAL_DISCOUNT: f64 = 0.25;

fn is_large(parcel: &Parcel) -> bool {
    parcel.area_m2() > LARGE_PARCEL_THRESHOLD_M2
}

/// Attractiveness score: 75 base, +15 when buildable, +10 when large.
///
/// # Examples
/// ```
/// use swissparcel::domain::{insights, Parcel, ParcelInput};
///
/// let parcel = Parcel::try_new(ParcelInput {
///     id: "12345".into(),
///     canton: "FR".into(),
///     municipality: None,
///     area_m2: 1200.0,
///     zoning: "buildable".into(),
///     is_buildable: true,
///     estimated_value_chf: None,
/// })
/// .expect("valid parcel");
/// assert_eq!(insights::score(&parcel), 100);
/// ```
#[must_use]
pub fn score(parcel: &Parcel) -> u32 {
    let mut score = BASE_SCORE;
    if parcel.is_buildable() {
        score += BUILDABLE_BONUS;
    }
    if is_large(parcel) {
        score += LARGE_PARCEL_BONUS;
    }
    score
}

/// One-sentence description of the parcel.
#[must_use]
pub fn summary(parcel: &Parcel) -> String {
    format!(
        "Parcel {} in canton {} covers {} m² and is zoned {}.",
        parcel.id(),
        parcel.canton(),
        parcel.area_m2(),
        parcel.zoning()
    )
}

/// A single recommendation chosen by the buildable flag.
#[must_use]
pub fn recommendations(parcel: &Parcel) -> Vec<String> {
    let advice = if parcel.is_buildable() {
        "Consider residential or mixed-use development; request a building permit from the municipality."
    } else {
        "Keep the parcel in agricultural or conservation use; a rezoning request is required before any construction."
    };
    vec![advice.to_owned()]
}

/// Plain-language explanation of the parcel's zoning category.
#[must_use]
pub fn zoning_explanation(parcel: &Parcel) -> String {
    match parcel.zoning() {
        "buildable" => "Buildable zone: construction is permitted subject to the municipal \
                        building regulations and a building permit."
            .to_owned(),
        "agricultural" => "Agricultural zone: land is reserved for farming; construction is \
                           limited to agricultural buildings and requires cantonal approval."
            .to_owned(),
        other => format!(
            "Zone '{other}': consult the municipal zoning plan for the uses permitted in this category."
        ),
    }
}

/// Valuation produced by [`value_estimate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEstimate {
    /// Estimated market value in Swiss francs.
    pub estimated_value_chf: f64,
    /// Short description of the formula that produced the estimate.
    pub method: &'static str,
}

/// Formula-based valuation.
///
/// The land base is `area × 200`. Buildable parcels add `area × 800`;
/// other parcels are valued at a quarter of the base.
#[must_use]
pub fn value_estimate(parcel: &Parcel) -> ValueEstimate {
    let area = parcel.area_m2();
    let base = area * LAND_RATE_CHF_PER_M2;
    if parcel.is_buildable() {
        ValueEstimate {
            estimated_value_chf: base + area * BUILDABLE_PREMIUM_CHF_PER_M2,
            method: "land base rate plus buildable premium",
        }
    } else {
        ValueEstimate {
            estimated_value_chf: base * AGRICULTURAL_DISCOUNT,
            method: "agricultural land discount",
        }
    }
}

/// Qualitative development potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum PotentialLevel {
    /// Not buildable.
    Low,
    /// Buildable, standard size.
    Moderate,
    /// Buildable and large.
    High,
}

impl fmt::Display for PotentialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("Low"),
            Self::Moderate => f.write_str("Moderate"),
            Self::High => f.write_str("High"),
        }
    }
}

/// Development potential with the suggested highest and best use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevelopmentPotential {
    /// Qualitative rating.
    pub potential: PotentialLevel,
    /// Suggested use.
    pub highest_best_use: &'static str,
}

/// Rate development potential from the buildable flag and size.
#[must_use]
pub fn development_potential(parcel: &Parcel) -> DevelopmentPotential {
    match (parcel.is_buildable(), is_large(parcel)) {
        (true, true) => DevelopmentPotential {
            potential: PotentialLevel::High,
            highest_best_use: "multi-family residential or mixed-use development",
        },
        (true, false) => DevelopmentPotential {
            potential: PotentialLevel::Moderate,
            highest_best_use: "single-family residential development",
        },
        (false, _) => DevelopmentPotential {
            potential: PotentialLevel::Low,
            highest_best_use: "agricultural or open-space use",
        },
    }
}

/// Legal restrictions that apply to the parcel.
///
/// Two general restrictions always apply; non-buildable parcels also carry a
/// zoning restriction naming their category.
#[must_use]
pub fn restrictions(parcel: &Parcel) -> Vec<String> {
    let mut restrictions = vec![
        "Subject to the cantonal spatial planning act and municipal building regulations."
            .to_owned(),
        "Easements and encumbrances recorded in the land register must be respected.".to_owned(),
    ];
    if !parcel.is_buildable() {
        restrictions.push(format!(
            "Construction is not permitted under the current '{}' zoning.",
            parcel.zoning()
        ));
    }
    restrictions
}

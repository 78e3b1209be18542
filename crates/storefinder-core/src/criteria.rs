//! User-configurable search criteria.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::{Category, PriceTier};

/// Literal marker looked for in a store's hours string to decide whether it
/// operates around the clock.
pub const ALL_DAY_MARKER: &str = "24:00";

/// The fixed set of search radii offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceOption {
    #[serde(rename = "500m")]
    Meters500,
    #[serde(rename = "1km")]
    Km1,
    #[serde(rename = "3km")]
    Km3,
    #[serde(rename = "5km")]
    Km5,
}

impl DistanceOption {
    pub const ALL: [DistanceOption; 4] = [
        DistanceOption::Meters500,
        DistanceOption::Km1,
        DistanceOption::Km3,
        DistanceOption::Km5,
    ];

    #[must_use]
    pub fn km(self) -> f64 {
        match self {
            DistanceOption::Meters500 => 0.5,
            DistanceOption::Km1 => 1.0,
            DistanceOption::Km3 => 3.0,
            DistanceOption::Km5 => 5.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DistanceOption::Meters500 => "500m",
            DistanceOption::Km1 => "1km",
            DistanceOption::Km3 => "3km",
            DistanceOption::Km5 => "5km",
        }
    }
}

impl FromStr for DistanceOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceOption::ALL
            .into_iter()
            .find(|o| o.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown distance '{s}'; expected one of 500m, 1km, 3km, 5km"))
    }
}

/// Operating-status requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusRequirement {
    #[default]
    Any,
    /// Only stores currently reporting `open`.
    Open,
    /// Only stores whose hours contain [`ALL_DAY_MARKER`].
    #[serde(rename = "24h")]
    AllDay,
}

impl FromStr for StatusRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(StatusRequirement::Any),
            "open" => Ok(StatusRequirement::Open),
            "24h" => Ok(StatusRequirement::AllDay),
            other => Err(format!("unknown status '{other}'; expected any, open or 24h")),
        }
    }
}

/// Filter parameters applied to the catalog. The result set is a pure
/// function of the catalog and these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub max_distance_km: f64,
    /// Accepted categories; empty accepts every category.
    pub categories: BTreeSet<Category>,
    /// Minimum rating; `None` means any.
    pub min_rating: Option<f64>,
    pub status: StatusRequirement,
    /// Required price tier; `None` means any.
    pub price_tier: Option<PriceTier>,
    /// A store must carry at least one of these tags when non-empty.
    pub features: BTreeSet<String>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            max_distance_km: DistanceOption::Km3.km(),
            categories: BTreeSet::new(),
            min_rating: None,
            status: StatusRequirement::Any,
            price_tier: None,
            features: BTreeSet::new(),
        }
    }
}

impl SearchCriteria {
    /// Criteria that reject nothing within `max_distance_km`.
    #[must_use]
    pub fn within(max_distance_km: f64) -> Self {
        Self {
            max_distance_km,
            ..Self::default()
        }
    }
}

/// Parse a rating threshold such as `"4.5"`, `"4.0+"` or `"any"`.
///
/// # Errors
///
/// Returns a message when the value is neither `any` nor a number in 0–5.
pub fn parse_min_rating(s: &str) -> Result<Option<f64>, String> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    let value: f64 = trimmed
        .trim_end_matches('+')
        .parse()
        .map_err(|e| format!("invalid rating '{s}': {e}"))?;
    if !(0.0..=5.0).contains(&value) {
        return Err(format!("rating {value} out of range 0-5"));
    }
    Ok(Some(value))
}

//! Catalog entry types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurant,
    Retail,
    Service,
    Entertainment,
    Health,
    Education,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Restaurant,
        Category::Retail,
        Category::Service,
        Category::Entertainment,
        Category::Health,
        Category::Education,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Restaurant => write!(f, "restaurant"),
            Category::Retail => write!(f, "retail"),
            Category::Service => write!(f, "service"),
            Category::Entertainment => write!(f, "entertainment"),
            Category::Health => write!(f, "health"),
            Category::Education => write!(f, "education"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Budget,
    Moderate,
    Expensive,
    Luxury,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::Moderate,
        PriceTier::Expensive,
        PriceTier::Luxury,
    ];
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTier::Budget => write!(f, "budget"),
            PriceTier::Moderate => write!(f, "moderate"),
            PriceTier::Expensive => write!(f, "expensive"),
            PriceTier::Luxury => write!(f, "luxury"),
        }
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceTier::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown price tier '{s}'; expected budget, moderate, expensive or luxury")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreStatus {
    Open,
    Closed,
    ClosingSoon,
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreStatus::Open => write!(f, "open"),
            StoreStatus::Closed => write!(f, "closed"),
            StoreStatus::ClosingSoon => write!(f, "closing-soon"),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Points-program terms carried by partner stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerTerms {
    /// Points the current member has earned at this store so far.
    pub points_earned: u32,
    /// Accrual rate as a whole percentage of the purchase amount.
    pub points_rate: u8,
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub rating: f64,
    pub reviews: u32,
    pub price_range: PriceTier,
    /// Distance from the reference point in kilometers. Maintained outside
    /// this crate; search never recomputes it.
    pub distance_km: f64,
    pub status: StoreStatus,
    pub hours: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub coordinates: Option<Coordinates>,
    /// Present only for stores participating in the points program.
    pub partner: Option<PartnerTerms>,
}

impl Store {
    #[must_use]
    pub fn is_partner(&self) -> bool {
        self.partner.is_some()
    }

    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Restaurant".parse::<Category>(), Ok(Category::Restaurant));
        assert_eq!(" health ".parse::<Category>(), Ok(Category::Health));
        assert!("bakery".parse::<Category>().is_err());
    }

    #[test]
    fn price_tier_parses_its_display_form() {
        for tier in PriceTier::ALL {
            assert_eq!(tier.to_string().parse::<PriceTier>(), Ok(tier));
        }
        assert!("cheap".parse::<PriceTier>().is_err());
    }

    #[test]
    fn closing_soon_uses_kebab_case() {
        let status: StoreStatus = serde_json::from_str("\"closing-soon\"").unwrap();
        assert_eq!(status, StoreStatus::ClosingSoon);
        assert_eq!(status.to_string(), "closing-soon");
    }
}

use serde::{Deserialize, Serialize};

use crate::store::Coordinates;

/// The search reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Free text supplied by the user or configuration.
    Address { text: String },
    /// A device fix plus the address text derived from it.
    Coordinates {
        coordinates: Coordinates,
        address: String,
    },
}

impl Location {
    #[must_use]
    pub fn address(text: impl Into<String>) -> Self {
        Location::Address { text: text.into() }
    }

    /// Human-readable form of the location.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Location::Address { text } => text,
            Location::Coordinates { address, .. } => address,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Address { .. } => None,
            Location::Coordinates { coordinates, .. } => Some(*coordinates),
        }
    }
}

/// Address text used when reverse geocoding is unavailable:
/// `"lat: 35.6812, lng: 139.7671"`.
#[must_use]
pub fn coordinate_label(coordinates: Coordinates) -> String {
    format!("lat: {:.4}, lng: {:.4}", coordinates.lat, coordinates.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_label_rounds_to_four_places() {
        let label = coordinate_label(Coordinates {
            lat: 35.681_236_7,
            lng: 139.767_125_4,
        });
        assert_eq!(label, "lat: 35.6812, lng: 139.7671");
    }

    #[test]
    fn coordinate_label_keeps_sign() {
        let label = coordinate_label(Coordinates {
            lat: -33.8688,
            lng: -151.2,
        });
        assert_eq!(label, "lat: -33.8688, lng: -151.2000");
    }

    #[test]
    fn display_text_for_each_variant() {
        let manual = Location::address("Shibuya Station");
        assert_eq!(manual.display_text(), "Shibuya Station");
        assert!(manual.coordinates().is_none());

        let fix = Location::Coordinates {
            coordinates: Coordinates { lat: 1.0, lng: 2.0 },
            address: "Somewhere".to_string(),
        };
        assert_eq!(fix.display_text(), "Somewhere");
        assert_eq!(fix.coordinates(), Some(Coordinates { lat: 1.0, lng: 2.0 }));
    }

    #[test]
    fn location_serializes_tagged() {
        let json = serde_json::to_value(Location::address("Tokyo Tower")).unwrap();
        assert_eq!(json["kind"], "address");
        assert_eq!(json["text"], "Tokyo Tower");
    }
}

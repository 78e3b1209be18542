//! Map framing for the current location and result pins.

use serde::Serialize;

use crate::location::Location;
use crate::store::{Coordinates, Store};

/// Center used before any device fix is available (Tokyo Station).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 35.681_197_9,
    lng: 139.764_749_9,
};
pub const DEFAULT_ZOOM: f64 = 13.1;
pub const LOCATED_ZOOM: f64 = 15.0;
/// Only the nearest results get a pin.
pub const MAX_PINS: usize = 8;

const EMBED_BASE_URL: &str = "https://www.google.com/maps/embed/v1/view";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: f64,
}

impl MapView {
    /// Frame the map on `location`, zooming in when it carries a device fix.
    #[must_use]
    pub fn for_location(location: &Location) -> Self {
        match location.coordinates() {
            Some(center) => Self {
                center,
                zoom: LOCATED_ZOOM,
            },
            None => Self {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
        }
    }

    /// Embeddable map URL for this view.
    #[must_use]
    pub fn embed_url(&self, api_key: &str, language: &str) -> String {
        format!(
            "{EMBED_BASE_URL}?key={api_key}&center={},{}&zoom={}&maptype=roadmap&language={language}",
            self.center.lat, self.center.lng, self.zoom
        )
    }
}

/// A marker for one result on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin<'a> {
    /// 1-based position in the result list.
    pub rank: usize,
    pub store_id: &'a str,
    pub name: &'a str,
    pub partner: bool,
    pub coordinates: Option<Coordinates>,
}

/// Pins for the first [`MAX_PINS`] results, in result order.
#[must_use]
pub fn nearby_pins<'a>(results: &[&'a Store]) -> Vec<MapPin<'a>> {
    results
        .iter()
        .take(MAX_PINS)
        .enumerate()
        .map(|(i, store)| MapPin {
            rank: i + 1,
            store_id: &store.id,
            name: &store.name,
            partner: store.is_partner(),
            coordinates: store.coordinates,
        })
        .collect()
}

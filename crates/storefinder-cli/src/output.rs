//! Plain-text rendering of results and store details.

use storefinder_core::display::{
    category_label, points_line, price_label, rating_line, status_label, summary_line,
};
use storefinder_core::{nearby_pins, AppConfig, MapView, Session, Store};

#[must_use]
pub fn render_results(session: &Session, config: &AppConfig) -> String {
    let state = session.state();
    let results = session.results();

    let mut lines = vec![format!(
        "{} stores within {}km of {}",
        results.len(),
        state.criteria.max_distance_km,
        state.location.display_text()
    )];

    if results.is_empty() {
        lines.push("No stores match these filters.".to_string());
    }
    for (i, store) in results.iter().enumerate() {
        lines.push(format!("{:>2}. {}", i + 1, summary_line(store)));
        lines.push(format!("    {}", rating_line(store)));
        if let Some(points) = points_line(store) {
            lines.push(format!("    {points}"));
        }
    }

    let view = MapView::for_location(&state.location);
    lines.push(String::new());
    lines.push(format!(
        "Map: {:.4}, {:.4} (zoom {})",
        view.center.lat, view.center.lng, view.zoom
    ));
    for pin in nearby_pins(&results) {
        let marker = if pin.partner { "*" } else { "-" };
        lines.push(format!("  {marker} {} {}", pin.rank, pin.name));
    }
    if let Some(key) = config.maps_api_key.as_deref() {
        lines.push(view.embed_url(key, &config.geocoder_language));
    }

    lines.join("\n")
}

#[must_use]
pub fn render_store(store: &Store) -> String {
    let mut lines = vec![
        format!("{} ({})", store.name, store.id),
        format!("Category: {}", category_label(store.category)),
        format!("Rating:   {}", rating_line(store)),
        format!("Price:    {}", price_label(store.price_range)),
        format!("Distance: {}km", store.distance_km),
        format!("Status:   {}", status_label(store.status)),
        format!("Hours:    {}", store.hours),
        format!("Phone:    {}", store.phone),
        format!("Address:  {}", store.address),
    ];
    if !store.features.is_empty() {
        lines.push(format!("Features: {}", store.features.join(", ")));
    }
    if !store.specialties.is_empty() {
        lines.push(format!("Known for: {}", store.specialties.join(", ")));
    }
    if let Some(points) = points_line(store) {
        lines.push(format!("Points:   {points}"));
    }
    lines.join("\n")
}

//! Text formatting for store listings.

use crate::store::{Category, PriceTier, Store, StoreStatus};

#[must_use]
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Restaurant => "Restaurants & Cafes",
        Category::Retail => "Retail & Shopping",
        Category::Service => "Services & Beauty",
        Category::Entertainment => "Entertainment",
        Category::Health => "Health & Medical",
        Category::Education => "Education & Learning",
    }
}

#[must_use]
pub fn price_symbol(tier: PriceTier) -> &'static str {
    match tier {
        PriceTier::Budget => "¥",
        PriceTier::Moderate => "¥¥",
        PriceTier::Expensive => "¥¥¥",
        PriceTier::Luxury => "¥¥¥¥",
    }
}

#[must_use]
pub fn price_label(tier: PriceTier) -> String {
    let name = match tier {
        PriceTier::Budget => "Budget",
        PriceTier::Moderate => "Moderate",
        PriceTier::Expensive => "Upscale",
        PriceTier::Luxury => "Luxury",
    };
    format!("{name} ({})", price_symbol(tier))
}

/// Listings only distinguish open from not open.
#[must_use]
pub fn status_label(status: StoreStatus) -> &'static str {
    match status {
        StoreStatus::Open => "Open now",
        StoreStatus::Closed | StoreStatus::ClosingSoon => "Closed",
    }
}

/// Format an integer with comma thousands separators.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[must_use]
pub fn rating_line(store: &Store) -> String {
    format!("{:.1} ({} reviews)", store.rating, group_thousands(store.reviews.into()))
}

/// Points summary for partner stores that have accrued points.
#[must_use]
pub fn points_line(store: &Store) -> Option<String> {
    let partner = store.partner.as_ref()?;
    if partner.points_earned == 0 {
        return None;
    }
    Some(format!(
        "{}pt earned ({}% back)",
        group_thousands(partner.points_earned.into()),
        partner.points_rate
    ))
}

/// One-line listing entry: name, category, price, distance, status.
#[must_use]
pub fn summary_line(store: &Store) -> String {
    format!(
        "{} [{}] {} {}km {}",
        store.name,
        category_label(store.category),
        price_symbol(store.price_range),
        store.distance_km,
        status_label(store.status)
    )
}

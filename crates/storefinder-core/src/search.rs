//! Catalog search.
//!
//! A single pass over the catalog evaluating each predicate in turn, then a
//! stable ascending sort on distance. Pure and infallible: an empty result is
//! a normal outcome.

use crate::criteria::{SearchCriteria, StatusRequirement, ALL_DAY_MARKER};
use crate::store::{Store, StoreStatus};

/// Return the stores matching every criterion, nearest first.
///
/// Stores at equal distance keep their catalog order.
#[must_use]
pub fn search<'a>(catalog: &'a [Store], criteria: &SearchCriteria) -> Vec<&'a Store> {
    let mut hits: Vec<&Store> = catalog.iter().filter(|s| matches(s, criteria)).collect();
    hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    tracing::trace!(
        catalog = catalog.len(),
        hits = hits.len(),
        max_distance_km = criteria.max_distance_km,
        "search complete"
    );
    hits
}

/// Whether `store` passes every predicate in `criteria`.
#[must_use]
pub fn matches(store: &Store, criteria: &SearchCriteria) -> bool {
    if store.distance_km > criteria.max_distance_km {
        return false;
    }

    if !criteria.categories.is_empty() && !criteria.categories.contains(&store.category) {
        return false;
    }

    if let Some(min_rating) = criteria.min_rating {
        if store.rating < min_rating {
            return false;
        }
    }

    match criteria.status {
        StatusRequirement::Any => {}
        StatusRequirement::Open => {
            if store.status != StoreStatus::Open {
                return false;
            }
        }
        // Substring heuristic: "06:00-24:00" passes, "24 hours" and
        // overnight ranges like "10:00-05:00+1" do not.
        StatusRequirement::AllDay => {
            if !store.hours.contains(ALL_DAY_MARKER) {
                return false;
            }
        }
    }

    if let Some(tier) = criteria.price_tier {
        if store.price_range != tier {
            return false;
        }
    }

    if !criteria.features.is_empty() && !criteria.features.iter().any(|f| store.has_feature(f)) {
        return false;
    }

    true
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;

//! Session state and its single update function.
//!
//! All user-driven changes flow through [`reduce`]. [`Session`] pairs the
//! state with the catalog and re-runs the search whenever an action changes
//! the criteria or the reference location.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::criteria::{DistanceOption, SearchCriteria, StatusRequirement};
use crate::location::Location;
use crate::search::search;
use crate::store::{Category, PriceTier, Store};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub criteria: SearchCriteria,
    pub location: Location,
    /// Ids of the stores matching `criteria`, nearest first.
    pub results: Vec<String>,
    pub selected_store: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            location,
            results: Vec::new(),
            selected_store: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SessionAction {
    SetDistance(DistanceOption),
    ToggleCategory { category: Category, selected: bool },
    SetMinRating(Option<f64>),
    SetStatus(StatusRequirement),
    SetPriceTier(Option<PriceTier>),
    ToggleFeature { feature: String, selected: bool },
    SetLocation(Location),
    SelectStore(String),
    ClearSelection,
    ResetFilters,
}

/// Apply `action` to `state`.
///
/// Returns `true` when the result set must be recomputed: the criteria
/// changed, or a new reference location was set.
pub fn reduce(state: &mut SessionState, action: SessionAction) -> bool {
    let before = state.criteria.clone();
    let criteria = &mut state.criteria;

    match action {
        SessionAction::SetDistance(option) => criteria.max_distance_km = option.km(),
        SessionAction::ToggleCategory { category, selected } => {
            if selected {
                criteria.categories.insert(category);
            } else {
                criteria.categories.remove(&category);
            }
        }
        SessionAction::SetMinRating(rating) => criteria.min_rating = rating,
        SessionAction::SetStatus(status) => criteria.status = status,
        SessionAction::SetPriceTier(tier) => criteria.price_tier = tier,
        SessionAction::ToggleFeature { feature, selected } => {
            if selected {
                criteria.features.insert(feature);
            } else {
                criteria.features.remove(&feature);
            }
        }
        SessionAction::ResetFilters => *criteria = SearchCriteria::default(),
        SessionAction::SetLocation(location) => {
            state.location = location;
            return true;
        }
        SessionAction::SelectStore(id) => {
            state.selected_store = Some(id);
            return false;
        }
        SessionAction::ClearSelection => {
            state.selected_store = None;
            return false;
        }
    }

    state.criteria != before
}

/// A user session over a fixed catalog.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    state: SessionState,
}

impl Session {
    /// Start a session with default criteria and run the initial search.
    #[must_use]
    pub fn new(catalog: Catalog, location: Location) -> Self {
        let mut session = Self {
            catalog,
            state: SessionState::new(location),
        };
        session.refresh();
        session
    }

    /// Resume a session from a previously captured state.
    #[must_use]
    pub fn from_state(catalog: Catalog, state: SessionState) -> Self {
        let mut session = Self { catalog, state };
        session.refresh();
        session
    }

    /// Apply an action, re-running the search when needed. Returns whether
    /// the search was re-run.
    pub fn dispatch(&mut self, action: SessionAction) -> bool {
        if let SessionAction::SelectStore(id) = &action {
            if self.catalog.get(id).is_none() {
                tracing::debug!(store_id = %id, "ignoring selection of unknown store");
                return false;
            }
        }

        let rerun = reduce(&mut self.state, action);
        if rerun {
            self.refresh();
        }
        rerun
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current results resolved against the catalog.
    #[must_use]
    pub fn results(&self) -> Vec<&Store> {
        self.state
            .results
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    #[must_use]
    pub fn selected_store(&self) -> Option<&Store> {
        self.state
            .selected_store
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    fn refresh(&mut self) {
        self.state.results = search(&self.catalog.stores, &self.state.criteria)
            .into_iter()
            .map(|s| s.id.clone())
            .collect();
        tracing::debug!(
            location = self.state.location.display_text(),
            results = self.state.results.len(),
            "search refreshed"
        );
    }
}

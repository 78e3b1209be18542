use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::ConfigError;

const REFERENCE_CATALOG_YAML: &str = include_str!("../../../config/stores.yaml");

/// The fixed store collection searched against. Never mutated by search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub stores: Vec<Store>,
}

impl Catalog {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Largest distance of any store, or `0.0` for an empty catalog.
    #[must_use]
    pub fn max_distance_km(&self) -> f64 {
        self.stores
            .iter()
            .map(|s| s.distance_km)
            .fold(0.0, f64::max)
    }
}

/// Load and validate a store catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = parse_catalog(&content)?;
    tracing::debug!(path = %path.display(), stores = catalog.len(), "loaded store catalog");
    Ok(catalog)
}

/// Parse and validate a store catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not a valid catalog document or fails
/// validation.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// The twelve-store reference catalog bundled with the crate.
///
/// # Errors
///
/// Returns `ConfigError` if the bundled document fails to parse or validate.
pub fn reference_catalog() -> Result<Catalog, ConfigError> {
    parse_catalog(REFERENCE_CATALOG_YAML)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in &catalog.stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty id",
                store.name
            )));
        }

        if !seen_ids.insert(store.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }

        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' must have a non-empty name",
                store.id
            )));
        }

        if !(0.0..=5.0).contains(&store.rating) {
            return Err(ConfigError::Validation(format!(
                "store '{}' has invalid rating {}; must be between 0.0 and 5.0",
                store.id, store.rating
            )));
        }

        if !store.distance_km.is_finite() || store.distance_km < 0.0 {
            return Err(ConfigError::Validation(format!(
                "store '{}' has invalid distance {}",
                store.id, store.distance_km
            )));
        }

        if let Some(partner) = &store.partner {
            if partner.points_rate > 100 {
                return Err(ConfigError::Validation(format!(
                    "store '{}' has invalid points rate {}%",
                    store.id, partner.points_rate
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

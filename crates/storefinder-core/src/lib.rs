pub mod app_config;
pub mod catalog;
pub mod config;
pub mod criteria;
pub mod display;
pub mod error;
pub mod location;
pub mod map;
pub mod search;
pub mod session;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, parse_catalog, reference_catalog, Catalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{parse_min_rating, DistanceOption, SearchCriteria, StatusRequirement};
pub use error::ConfigError;
pub use location::{coordinate_label, Location};
pub use map::{nearby_pins, MapPin, MapView};
pub use search::{matches, search};
pub use session::{reduce, Session, SessionAction, SessionState};
pub use store::{Category, Coordinates, PartnerTerms, PriceTier, Store, StoreStatus};

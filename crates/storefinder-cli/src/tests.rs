use std::io::Cursor;
use std::path::PathBuf;

use storefinder_core::{
    reference_catalog, AppConfig, Category, DistanceOption, Environment, PriceTier,
    StatusRequirement,
};
use storefinder_locate::{PositionProvider, UserPrompt};

use super::*;
use crate::locate::LinePrompt;

fn test_config(maps_api_key: Option<&str>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        catalog_path: PathBuf::from("./config/stores.yaml"),
        default_address: "Nishi-Shinjuku 1-1-1, Shinjuku, Tokyo".to_string(),
        geocoder_url: "http://127.0.0.1:9".to_string(),
        geocoder_language: "ja".to_string(),
        geocoder_timeout_secs: 1,
        user_agent: "storefinder-test".to_string(),
        maps_api_key: maps_api_key.map(str::to_string),
    }
}

fn reference_session() -> Session {
    Session::new(
        reference_catalog().expect("bundled catalog is valid"),
        Location::address("Nishi-Shinjuku 1-1-1, Shinjuku, Tokyo"),
    )
}

fn result_ids(session: &Session) -> Vec<&str> {
    session.results().iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storefinder"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_search_without_filters() {
    let cli = Cli::try_parse_from(["storefinder", "search"]).expect("expected valid cli args");
    let Some(Commands::Search { filters }) = cli.command else {
        panic!("expected search command");
    };
    assert!(filters.distance.is_none());
    assert!(filters.categories.is_empty());
    assert!(filters.features.is_empty());
}

#[test]
fn parses_search_with_every_filter() {
    let cli = Cli::try_parse_from([
        "storefinder",
        "search",
        "--distance",
        "1km",
        "--category",
        "restaurant,retail",
        "--rating",
        "4.5+",
        "--status",
        "24h",
        "--price",
        "budget",
        "--feature",
        "wifi",
        "--feature",
        "parking",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search { filters }) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(filters.distance, Some(DistanceOption::Km1));
    assert_eq!(
        filters.categories,
        vec![Category::Restaurant, Category::Retail]
    );
    assert_eq!(filters.rating.as_deref(), Some("4.5+"));
    assert_eq!(filters.status, Some(StatusRequirement::AllDay));
    assert_eq!(filters.price, Some(PriceTier::Budget));
    assert_eq!(filters.features, vec!["wifi", "parking"]);
}

#[test]
fn rejects_unknown_distance() {
    assert!(Cli::try_parse_from(["storefinder", "search", "--distance", "2km"]).is_err());
}

#[test]
fn rejects_unknown_category() {
    assert!(Cli::try_parse_from(["storefinder", "search", "--category", "bakery"]).is_err());
}

#[test]
fn parses_locate_with_coordinates() {
    let cli = Cli::try_parse_from([
        "storefinder",
        "locate",
        "--lat",
        "-33.8688",
        "--lng",
        "151.2093",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Locate { device, .. }) = cli.command else {
        panic!("expected locate command");
    };
    assert_eq!(device.lat, Some(-33.8688));
    assert_eq!(device.lng, Some(151.2093));
    assert!(!device.deny);
}

#[test]
fn locate_lat_requires_lng() {
    assert!(Cli::try_parse_from(["storefinder", "locate", "--lat", "35.0"]).is_err());
}

#[test]
fn locate_failure_modes_are_exclusive() {
    assert!(Cli::try_parse_from(["storefinder", "locate", "--deny", "--unsupported"]).is_err());
    assert!(Cli::try_parse_from([
        "storefinder",
        "locate",
        "--unavailable",
        "--lat",
        "1",
        "--lng",
        "2"
    ])
    .is_err());
}

#[test]
fn parses_show_with_id() {
    let cli = Cli::try_parse_from(["storefinder", "show", "store003"]).expect("valid args");
    assert!(matches!(
        cli.command,
        Some(Commands::Show { ref id }) if id == "store003"
    ));
}

#[test]
fn show_requires_id() {
    assert!(Cli::try_parse_from(["storefinder", "show"]).is_err());
}

#[test]
fn device_flags_select_provider() {
    let unsupported = DeviceArgs {
        unsupported: true,
        ..DeviceArgs::default()
    };
    assert!(!unsupported.provider().is_supported());
    assert!(DeviceArgs::default().provider().is_supported());
}

#[test]
fn filter_actions_follow_flag_order() {
    let filters = FilterArgs {
        distance: Some(DistanceOption::Km5),
        categories: vec![Category::Health],
        rating: Some("any".to_string()),
        price: Some(PriceTier::Budget),
        features: vec![" wheelchair ".to_string()],
        ..FilterArgs::default()
    };

    let actions = filters.actions().expect("valid filters");

    assert_eq!(
        actions,
        vec![
            SessionAction::SetDistance(DistanceOption::Km5),
            SessionAction::ToggleCategory {
                category: Category::Health,
                selected: true
            },
            SessionAction::SetMinRating(None),
            SessionAction::SetPriceTier(Some(PriceTier::Budget)),
            SessionAction::ToggleFeature {
                feature: "wheelchair".to_string(),
                selected: true
            },
        ]
    );
}

#[test]
fn invalid_rating_is_an_error() {
    let filters = FilterArgs {
        rating: Some("excellent".to_string()),
        ..FilterArgs::default()
    };
    assert!(filters.actions().is_err());
}

#[test]
fn category_filter_narrows_session_results() {
    let mut session = reference_session();
    let filters = FilterArgs {
        categories: vec![Category::Restaurant],
        ..FilterArgs::default()
    };

    filters.apply(&mut session).expect("valid filters");

    assert_eq!(result_ids(&session), vec!["store001", "store011", "store006"]);
}

#[test]
fn line_prompt_returns_typed_address() {
    let prompt = LinePrompt::new(Cursor::new("  Shibuya Station \n"));
    assert_eq!(
        prompt.request_address("Where are you?", "Tokyo"),
        Some("Shibuya Station".to_string())
    );
}

#[test]
fn line_prompt_empty_line_accepts_suggestion() {
    let prompt = LinePrompt::new(Cursor::new("\n"));
    assert_eq!(
        prompt.request_address("Where are you?", "Nishi-Shinjuku 1-1-1"),
        Some("Nishi-Shinjuku 1-1-1".to_string())
    );
}

#[test]
fn line_prompt_end_of_input_cancels() {
    let prompt = LinePrompt::new(Cursor::new(""));
    assert_eq!(prompt.request_address("Where are you?", "Tokyo"), None);
}

#[test]
fn results_render_header_listing_and_map() {
    let session = reference_session();

    let text = output::render_results(&session, &test_config(None));

    assert!(text.starts_with("12 stores within 3km of Nishi-Shinjuku 1-1-1, Shinjuku, Tokyo"));
    assert!(text.contains(" 1. Beauty Salon Rei"));
    assert!(text.contains("150pt earned (5% back)"));
    assert!(text.contains("Map: 35.6812, 139.7647 (zoom 13.1)"));
    assert!(!text.contains("maps/embed"), "no embed URL without a key");
}

#[test]
fn results_include_embed_url_when_key_configured() {
    let session = reference_session();

    let text = output::render_results(&session, &test_config(Some("test-key")));

    assert!(text.contains("https://www.google.com/maps/embed/v1/view?key=test-key"));
}

#[test]
fn empty_results_say_so() {
    let mut session = reference_session();
    session.dispatch(SessionAction::SetPriceTier(Some(PriceTier::Luxury)));

    let text = output::render_results(&session, &test_config(None));

    assert!(text.starts_with("0 stores within 3km"));
    assert!(text.contains("No stores match these filters."));
}

#[test]
fn store_details_render_every_section() {
    let catalog = reference_catalog().expect("bundled catalog is valid");
    let store = catalog.get("store001").expect("store001 exists");

    let text = output::render_store(store);

    assert!(text.starts_with("Cafe Dolce (store001)"));
    assert!(text.contains("Rating:   4.6 (324 reviews)"));
    assert!(text.contains("Price:    Moderate (¥¥)"));
    assert!(text.contains("Status:   Open now"));
    assert!(text.contains("Features: wifi, parking"));
    assert!(text.contains("Known for: coffee, pasta, dessert"));
    assert!(text.contains("Points:   150pt earned (5% back)"));
}

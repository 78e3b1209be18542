//! End-to-end acquisition against a mocked geocoder.

use std::sync::{Arc, Mutex};

use storefinder_core::{Coordinates, Location};
use storefinder_locate::{
    AcquisitionOutcome, AcquisitionState, LocationAcquirer, NominatimClient,
    StaticPositionProvider, UserPrompt,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKYO_STATION: Coordinates = Coordinates {
    lat: 35.681_2,
    lng: 139.767_1,
};

#[derive(Clone, Default)]
struct RecordingPrompt {
    notes: Arc<Mutex<Vec<String>>>,
}

impl UserPrompt for RecordingPrompt {
    fn notify(&self, message: &str) {
        self.notes.lock().unwrap().push(message.to_string());
    }

    fn request_address(&self, _message: &str, _suggestion: &str) -> Option<String> {
        None
    }
}

fn geocoder(base_url: &str) -> NominatimClient {
    NominatimClient::with_base_url(base_url, "en", 5, "storefinder-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn device_fix_resolves_to_geocoded_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "display_name": "Marunouchi, Chiyoda" })),
        )
        .mount(&server)
        .await;

    let prompt = RecordingPrompt::default();
    let acquirer = LocationAcquirer::new(
        StaticPositionProvider::fixed(TOKYO_STATION),
        geocoder(&server.uri()),
        prompt.clone(),
    );

    let outcome = acquirer.acquire().await;

    let expected = Location::Coordinates {
        coordinates: TOKYO_STATION,
        address: "Marunouchi, Chiyoda".to_string(),
    };
    assert_eq!(outcome, AcquisitionOutcome::Located(expected));
    assert_eq!(
        prompt.notes.lock().unwrap().as_slice(),
        ["Current location found: Marunouchi, Chiyoda"]
    );
}

#[tokio::test]
async fn geocoder_outage_still_resolves_with_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let acquirer = LocationAcquirer::new(
        StaticPositionProvider::fixed(TOKYO_STATION),
        geocoder(&server.uri()),
        RecordingPrompt::default(),
    );

    let outcome = acquirer.acquire().await;

    let location = outcome.location().expect("device fix resolves the cycle");
    assert_eq!(location.display_text(), "lat: 35.6812, lng: 139.7671");
    assert!(matches!(
        acquirer.state(),
        AcquisitionState::Resolved { cycle: 1, .. }
    ));
}

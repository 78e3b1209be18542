//! Reverse geocoding over HTTP.
//!
//! [`NominatimClient`] turns a coordinate pair into a display address using
//! the Nominatim `/reverse` endpoint. One request per call, no retry: callers
//! treat any error as "no address" and fall back to a coordinate label.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use storefinder_core::Coordinates;

use crate::error::GeocodeError;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Best-effort coordinate → address lookup.
pub trait ReverseGeocoder: Send + Sync {
    fn reverse(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<String, GeocodeError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Client for the Nominatim reverse-geocoding API.
///
/// Use [`NominatimClient::new`] for the public service or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    language: String,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim service.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(language: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, language, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        language: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        // Nominatim's usage policy requires an identifying user agent.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that joining "reverse" appends a
        // segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            language: language.to_owned(),
        })
    }

    /// Looks up the display address for `coordinates`.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::HttpStatus`] on a non-2xx response.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected JSON.
    /// - [`GeocodeError::NoAddress`] if the response has no display name.
    pub async fn lookup_address(&self, coordinates: Coordinates) -> Result<String, GeocodeError> {
        let url = self.build_url(coordinates);
        tracing::debug!(lat = coordinates.lat, lng = coordinates.lng, "reverse geocoding");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: ReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("reverse(lat={}, lon={})", coordinates.lat, coordinates.lng),
                source: e,
            })?;

        parsed
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(GeocodeError::NoAddress)
    }

    fn build_url(&self, coordinates: Coordinates) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("reverse");
        }
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &coordinates.lat.to_string())
            .append_pair("lon", &coordinates.lng.to_string())
            .append_pair("accept-language", &self.language);
        url
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinates: Coordinates) -> Result<String, GeocodeError> {
        self.lookup_address(coordinates).await
    }
}

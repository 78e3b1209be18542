//! `locate` command: run one acquisition cycle against a simulated device,
//! then search around whatever location it produced.

use std::io::{BufRead, BufReader, Stdin};
use std::sync::Mutex;
use std::time::Duration;

use clap::Args;
use storefinder_core::map::DEFAULT_CENTER;
use storefinder_core::{AppConfig, Catalog, Coordinates, Location, Session, SessionAction};
use storefinder_locate::{
    AcquisitionOutcome, DeviceError, LocationAcquirer, NominatimClient, StaticPositionProvider,
    UserPrompt,
};

use crate::filters::FilterArgs;
use crate::output;

/// How the simulated device answers.
#[derive(Debug, Clone, Default, Args)]
pub struct DeviceArgs {
    /// Latitude of the device fix (defaults to Tokyo Station)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the device fix
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Simulate the user denying location permission
    #[arg(long, conflicts_with_all = ["lat", "lng", "unavailable", "unsupported"])]
    pub deny: bool,

    /// Simulate a device that cannot determine its position
    #[arg(long, conflicts_with_all = ["lat", "lng", "unsupported"])]
    pub unavailable: bool,

    /// Simulate a device without any location capability
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub unsupported: bool,

    /// Seconds the device takes to answer
    #[arg(long, default_value_t = 0)]
    pub delay_secs: u64,
}

impl DeviceArgs {
    #[must_use]
    pub fn provider(&self) -> StaticPositionProvider {
        let provider = if self.unsupported {
            StaticPositionProvider::unsupported()
        } else if self.deny {
            StaticPositionProvider::failing(DeviceError::PermissionDenied)
        } else if self.unavailable {
            StaticPositionProvider::failing(DeviceError::PositionUnavailable)
        } else {
            let fix = match (self.lat, self.lng) {
                (Some(lat), Some(lng)) => Coordinates { lat, lng },
                _ => DEFAULT_CENTER,
            };
            StaticPositionProvider::fixed(fix)
        };
        provider.with_delay(Duration::from_secs(self.delay_secs))
    }
}

/// Prompt that prints to stdout and reads answers line by line.
///
/// An empty line accepts the suggestion; end of input cancels.
pub struct LinePrompt<R> {
    input: Mutex<R>,
}

impl LinePrompt<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead> LinePrompt<R> {
    #[must_use]
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

impl<R: BufRead + Send> UserPrompt for LinePrompt<R> {
    fn notify(&self, message: &str) {
        println!("{message}");
    }

    fn request_address(&self, message: &str, suggestion: &str) -> Option<String> {
        println!("{message}");
        if !suggestion.is_empty() {
            println!("  [{suggestion}]");
        }

        let Ok(mut input) = self.input.lock() else {
            tracing::warn!("prompt input lock poisoned; treating as cancelled");
            return None;
        };
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let answer = line.trim();
                if answer.is_empty() {
                    Some(suggestion.to_string())
                } else {
                    Some(answer.to_string())
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read address from stdin");
                None
            }
        }
    }
}

/// Acquire a location, then print results around it.
///
/// A cancelled cycle keeps the configured reference address.
///
/// # Errors
///
/// Returns an error if the geocoder client cannot be built or the filter
/// flags are invalid. Acquisition itself never fails.
pub(crate) async fn run_locate(
    config: &AppConfig,
    catalog: Catalog,
    device: &DeviceArgs,
    filters: &FilterArgs,
) -> anyhow::Result<()> {
    let geocoder = NominatimClient::with_base_url(
        &config.geocoder_url,
        &config.geocoder_language,
        config.geocoder_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocoder client: {e}"))?;

    let mut session = Session::new(catalog, Location::address(config.default_address.clone()));
    filters.apply(&mut session)?;

    let acquirer = LocationAcquirer::new(device.provider(), geocoder, LinePrompt::stdin())
        .with_manual_suggestion(config.default_address.clone());

    match acquirer.acquire().await {
        AcquisitionOutcome::Located(location) | AcquisitionOutcome::Entered { location, .. } => {
            session.dispatch(SessionAction::SetLocation(location));
        }
        AcquisitionOutcome::Cancelled { reason } => {
            tracing::info!(reason = %reason, "keeping reference location");
        }
    }

    println!("{}", output::render_results(&session, config));
    Ok(())
}

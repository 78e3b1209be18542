//! Location acquisition.
//!
//! One call to [`LocationAcquirer::acquire`] is one acquisition cycle:
//!
//! ```text
//! Idle -> Acquiring -> ReverseGeocoding -> Resolved
//!            |
//!            +-> Failed -> ManualPending -> Resolved | Idle
//! ```
//!
//! The device reply and the backup timer race for the cycle's
//! [`CycleFlag`]; whichever loses has no effect. Reverse-geocoding failures
//! never fail the cycle, they degrade the address to a coordinate label.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use storefinder_core::{coordinate_label, Coordinates, Location};
use tokio::sync::{oneshot, watch};

use crate::cycle::CycleFlag;
use crate::device::{PositionOptions, PositionProvider, PositionSink};
use crate::error::AcquisitionError;
use crate::geocode::ReverseGeocoder;
use crate::prompt::{UserPrompt, MANUAL_ENTRY_PROMPT};

/// Ceiling on waiting for the device, independent of the device's own
/// timeout and longer than it.
pub const BACKUP_TIMEOUT: Duration = Duration::from_secs(8);

/// Observable acquisition state.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionState {
    Idle,
    Acquiring {
        cycle: u64,
    },
    ReverseGeocoding {
        cycle: u64,
        coordinates: Coordinates,
    },
    Failed {
        cycle: u64,
        error: AcquisitionError,
    },
    ManualPending {
        cycle: u64,
    },
    Resolved {
        cycle: u64,
        location: Location,
    },
}

/// How an acquisition cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionOutcome {
    /// The device produced a fix.
    Located(Location),
    /// The device path failed and the user typed an address.
    Entered {
        location: Location,
        reason: AcquisitionError,
    },
    /// The device path failed and the user declined to enter an address.
    Cancelled { reason: AcquisitionError },
}

impl AcquisitionOutcome {
    /// The new reference location, if the cycle produced one.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            AcquisitionOutcome::Located(location)
            | AcquisitionOutcome::Entered { location, .. } => Some(location),
            AcquisitionOutcome::Cancelled { .. } => None,
        }
    }
}

enum Race {
    Delivered(Result<crate::device::DeviceReply, oneshot::error::RecvError>),
    BackupFired,
}

pub struct LocationAcquirer<P, G, U> {
    device: P,
    geocoder: G,
    prompt: U,
    options: PositionOptions,
    backup_timeout: Duration,
    manual_suggestion: String,
    state: watch::Sender<AcquisitionState>,
    cycles: AtomicU64,
}

impl<P, G, U> LocationAcquirer<P, G, U>
where
    P: PositionProvider,
    G: ReverseGeocoder,
    U: UserPrompt,
{
    #[must_use]
    pub fn new(device: P, geocoder: G, prompt: U) -> Self {
        let (state, _) = watch::channel(AcquisitionState::Idle);
        Self {
            device,
            geocoder,
            prompt,
            options: PositionOptions::default(),
            backup_timeout: BACKUP_TIMEOUT,
            manual_suggestion: String::new(),
            state,
            cycles: AtomicU64::new(0),
        }
    }

    /// Text pre-filled in the manual address prompt.
    #[must_use]
    pub fn with_manual_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.manual_suggestion = suggestion.into();
        self
    }

    /// Watch every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> AcquisitionState {
        self.state.borrow().clone()
    }

    /// Run one acquisition cycle to its single terminal outcome.
    pub async fn acquire(&self) -> AcquisitionOutcome {
        let cycle = CycleFlag::new(self.cycles.fetch_add(1, Ordering::Relaxed) + 1);
        let id = cycle.id();

        if !self.device.is_supported() {
            tracing::warn!(cycle = id, "device has no location capability");
            return self.fall_back_to_manual(id, AcquisitionError::Unsupported);
        }

        self.transition(AcquisitionState::Acquiring { cycle: id });
        tracing::info!(
            cycle = id,
            device_timeout = ?self.options.timeout,
            backup_timeout = ?self.backup_timeout,
            "requesting device position"
        );

        let (tx, mut rx) = oneshot::channel();
        self.device
            .request_position(&self.options, PositionSink::new(cycle.clone(), tx));

        // Dropping the sleep when the device wins cancels the backup timer.
        let race = tokio::select! {
            delivered = &mut rx => Race::Delivered(delivered),
            () = tokio::time::sleep(self.backup_timeout) => Race::BackupFired,
        };

        let fix = match race {
            Race::Delivered(Ok(reply)) => reply.map_err(AcquisitionError::from),
            Race::Delivered(Err(_)) => {
                // The device dropped its sink without answering.
                if cycle.try_conclude() {
                    tracing::warn!(cycle = id, "device abandoned the request");
                }
                Err(AcquisitionError::PositionUnavailable)
            }
            Race::BackupFired => {
                if cycle.try_conclude() {
                    Err(AcquisitionError::BackupTimeout)
                } else {
                    // The device claimed the cycle as the timer fired; its
                    // reply is already in the channel.
                    match rx.await {
                        Ok(reply) => reply.map_err(AcquisitionError::from),
                        Err(_) => Err(AcquisitionError::PositionUnavailable),
                    }
                }
            }
        };

        match fix {
            Ok(coordinates) => self.resolve_fix(id, coordinates).await,
            Err(error) => self.fall_back_to_manual(id, error),
        }
    }

    async fn resolve_fix(&self, id: u64, coordinates: Coordinates) -> AcquisitionOutcome {
        tracing::info!(
            cycle = id,
            lat = coordinates.lat,
            lng = coordinates.lng,
            "device position acquired"
        );
        self.transition(AcquisitionState::ReverseGeocoding {
            cycle: id,
            coordinates,
        });

        let address = match self.geocoder.reverse(coordinates).await {
            Ok(address) => address,
            Err(err) => {
                tracing::warn!(cycle = id, error = %err, "reverse geocoding failed; using coordinates");
                coordinate_label(coordinates)
            }
        };

        self.prompt.notify(&format!("Current location found: {address}"));
        let location = Location::Coordinates {
            coordinates,
            address,
        };
        self.transition(AcquisitionState::Resolved {
            cycle: id,
            location: location.clone(),
        });
        AcquisitionOutcome::Located(location)
    }

    fn fall_back_to_manual(&self, id: u64, error: AcquisitionError) -> AcquisitionOutcome {
        tracing::warn!(cycle = id, error = ?error, "location acquisition failed");
        self.transition(AcquisitionState::Failed {
            cycle: id,
            error: error.clone(),
        });
        self.prompt.notify(&error.to_string());

        self.transition(AcquisitionState::ManualPending { cycle: id });
        let entered = self
            .prompt
            .request_address(MANUAL_ENTRY_PROMPT, &self.manual_suggestion)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        if let Some(text) = entered {
            tracing::info!(cycle = id, address = %text, "manual location entered");
            self.prompt.notify(&format!("Current location set: {text}"));
            let location = Location::address(text);
            self.transition(AcquisitionState::Resolved {
                cycle: id,
                location: location.clone(),
            });
            AcquisitionOutcome::Entered {
                location,
                reason: error,
            }
        } else {
            tracing::info!(cycle = id, "manual location entry cancelled");
            self.transition(AcquisitionState::Idle);
            AcquisitionOutcome::Cancelled { reason: error }
        }
    }

    fn transition(&self, next: AcquisitionState) {
        tracing::debug!(state = ?next, "acquisition state");
        self.state.send_replace(next);
    }
}

#[cfg(test)]
#[path = "acquire_test.rs"]
mod tests;

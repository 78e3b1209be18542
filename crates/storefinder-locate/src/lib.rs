//! Current-location acquisition for the store finder.
//!
//! A device fix is raced against a backup timer, reverse-geocoded into a
//! display address, and on any failure the user is asked to type one.

pub mod acquire;
pub mod cycle;
pub mod device;
pub mod error;
pub mod geocode;
pub mod prompt;

pub use acquire::{AcquisitionOutcome, AcquisitionState, LocationAcquirer, BACKUP_TIMEOUT};
pub use cycle::CycleFlag;
pub use device::{PositionOptions, PositionProvider, PositionSink, StaticPositionProvider};
pub use error::{AcquisitionError, DeviceError, GeocodeError};
pub use geocode::{NominatimClient, ReverseGeocoder};
pub use prompt::{UserPrompt, MANUAL_ENTRY_PROMPT};

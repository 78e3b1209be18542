use thiserror::Error;

/// Error reported by a device position source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out")]
    Timeout,

    #[error("device error {code}: {message}")]
    Other { code: u16, message: String },
}

impl DeviceError {
    /// Map a numeric platform error code (1 = permission denied,
    /// 2 = position unavailable, 3 = timeout).
    #[must_use]
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => DeviceError::PermissionDenied,
            2 => DeviceError::PositionUnavailable,
            3 => DeviceError::Timeout,
            _ => DeviceError::Other {
                code,
                message: message.into(),
            },
        }
    }
}

/// Why a location could not be obtained from the device.
///
/// The `Display` text is the message shown to the user. Every variant leads
/// to the manual-entry prompt; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    #[error("Location services are not supported on this device. Please enter your address manually.")]
    Unsupported,

    #[error("Location access was denied. Allow location access in your settings, or enter your address manually.")]
    PermissionDenied,

    #[error("Your position is unavailable. The GPS signal may be weak or location services may be turned off. Please enter your address manually.")]
    PositionUnavailable,

    #[error("The location service took too long to respond. Please enter your address manually.")]
    DeviceTimeout,

    #[error("Timed out waiting for your location. Please enter your address manually.")]
    BackupTimeout,

    #[error("An error occurred while determining your location (code {code}). Please enter your address manually.")]
    Device { code: u16, message: String },
}

impl From<DeviceError> for AcquisitionError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::PermissionDenied => AcquisitionError::PermissionDenied,
            DeviceError::PositionUnavailable => AcquisitionError::PositionUnavailable,
            DeviceError::Timeout => AcquisitionError::DeviceTimeout,
            DeviceError::Other { code, message } => AcquisitionError::Device { code, message },
        }
    }
}

/// Errors returned by the reverse-geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The lookup succeeded but carried no display name.
    #[error("no address returned for coordinates")]
    NoAddress,

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

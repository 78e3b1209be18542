//! Device position sources.

use std::time::Duration;

use storefinder_core::Coordinates;
use tokio::sync::oneshot;

use crate::cycle::CycleFlag;
use crate::error::DeviceError;

pub(crate) type DeviceReply = Result<Coordinates, DeviceError>;

/// Options passed to the device with every request. Fixed, not user-exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Coarse fixes are preferred for speed and battery.
    pub high_accuracy: bool,
    /// The device reports [`DeviceError::Timeout`] after this long.
    pub timeout: Duration,
    /// A cached fix up to this old is acceptable.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(6),
            maximum_age: Duration::from_secs(300),
        }
    }
}

/// Single-use reply handle given to the device for one acquisition cycle.
///
/// The device may answer from any task at any time. Only a reply that wins
/// the cycle flag is forwarded; anything after the cycle concluded is
/// dropped and the call returns `false`.
#[derive(Debug)]
pub struct PositionSink {
    cycle: CycleFlag,
    tx: oneshot::Sender<DeviceReply>,
}

impl PositionSink {
    pub(crate) fn new(cycle: CycleFlag, tx: oneshot::Sender<DeviceReply>) -> Self {
        Self { cycle, tx }
    }

    #[must_use]
    pub fn cycle_id(&self) -> u64 {
        self.cycle.id()
    }

    /// Deliver a position fix. Returns whether it took effect.
    pub fn resolve(self, coordinates: Coordinates) -> bool {
        self.deliver(Ok(coordinates))
    }

    /// Deliver a device error. Returns whether it took effect.
    pub fn reject(self, error: DeviceError) -> bool {
        self.deliver(Err(error))
    }

    fn deliver(self, reply: DeviceReply) -> bool {
        if !self.cycle.try_conclude() {
            tracing::debug!(
                cycle = self.cycle.id(),
                ok = reply.is_ok(),
                "late device response ignored"
            );
            return false;
        }
        self.tx.send(reply).is_ok()
    }
}

/// A device geolocation capability.
pub trait PositionProvider: Send + Sync {
    /// Whether the capability exists at all on this device.
    fn is_supported(&self) -> bool {
        true
    }

    /// Start a position request. The answer goes to `sink`, possibly later
    /// and from another task.
    fn request_position(&self, options: &PositionOptions, sink: PositionSink);
}

/// A position source that answers with a fixed reply after a delay.
///
/// Honours [`PositionOptions::timeout`]: when the delay exceeds it the
/// request is rejected with [`DeviceError::Timeout`] once the timeout elapses.
#[derive(Debug, Clone)]
pub struct StaticPositionProvider {
    supported: bool,
    reply: DeviceReply,
    delay: Duration,
}

impl StaticPositionProvider {
    #[must_use]
    pub fn fixed(coordinates: Coordinates) -> Self {
        Self {
            supported: true,
            reply: Ok(coordinates),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn failing(error: DeviceError) -> Self {
        Self {
            supported: true,
            reply: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// A device without any location capability.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            reply: Err(DeviceError::PositionUnavailable),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl PositionProvider for StaticPositionProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn request_position(&self, options: &PositionOptions, sink: PositionSink) {
        let reply = self.reply.clone();
        let delay = self.delay;
        let timeout = options.timeout;

        tokio::spawn(async move {
            if delay > timeout {
                tokio::time::sleep(timeout).await;
                sink.reject(DeviceError::Timeout);
                return;
            }
            tokio::time::sleep(delay).await;
            match reply {
                Ok(coordinates) => sink.resolve(coordinates),
                Err(error) => sink.reject(error),
            };
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink(id: u64) -> (PositionSink, CycleFlag, oneshot::Receiver<DeviceReply>) {
        let flag = CycleFlag::new(id);
        let (tx, rx) = oneshot::channel();
        (PositionSink::new(flag.clone(), tx), flag, rx)
    }

    #[test]
    fn default_options_are_coarse_with_six_second_timeout() {
        let options = PositionOptions::default();
        assert!(!options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(6));
        assert_eq!(options.maximum_age, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn sink_forwards_first_reply() {
        let (sink, flag, rx) = sink(1);
        assert!(sink.resolve(Coordinates { lat: 1.0, lng: 2.0 }));
        assert!(flag.is_concluded());
        assert_eq!(rx.await.unwrap(), Ok(Coordinates { lat: 1.0, lng: 2.0 }));
    }

    #[tokio::test]
    async fn sink_is_inert_after_cycle_concluded() {
        let (sink, flag, mut rx) = sink(2);
        assert!(flag.try_conclude());
        assert!(!sink.reject(DeviceError::PermissionDenied));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn static_provider_times_out_when_slower_than_device_timeout() {
        let provider = StaticPositionProvider::fixed(Coordinates { lat: 1.0, lng: 1.0 })
            .with_delay(Duration::from_secs(30));
        let (sink, _flag, rx) = sink(3);
        provider.request_position(&PositionOptions::default(), sink);
        assert_eq!(rx.await.unwrap(), Err(DeviceError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn static_provider_replies_after_delay() {
        let provider =
            StaticPositionProvider::failing(DeviceError::PositionUnavailable).with_delay(Duration::from_secs(1));
        let (sink, _flag, rx) = sink(4);
        provider.request_position(&PositionOptions::default(), sink);
        assert_eq!(rx.await.unwrap(), Err(DeviceError::PositionUnavailable));
    }

    #[test]
    fn unsupported_provider_reports_it() {
        assert!(!StaticPositionProvider::unsupported().is_supported());
        assert!(StaticPositionProvider::fixed(Coordinates { lat: 0.0, lng: 0.0 }).is_supported());
    }
}

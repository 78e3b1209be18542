//! Per-attempt completion flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "this acquisition cycle has concluded" flag.
///
/// Every path that could end a cycle (device success, device error, backup
/// timer) must win [`CycleFlag::try_conclude`] before acting. Exactly one
/// caller ever wins per cycle.
#[derive(Debug, Clone)]
pub struct CycleFlag {
    id: u64,
    concluded: Arc<AtomicBool>,
}

impl CycleFlag {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            concluded: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Atomically claim the cycle. Returns `true` for the first caller only.
    #[must_use]
    pub fn try_conclude(&self) -> bool {
        self.concluded
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[must_use]
    pub fn is_concluded(&self) -> bool {
        self.concluded.load(Ordering::Acquire)
    }
}

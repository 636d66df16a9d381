use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of time for token expiry decisions.
///
/// Auth clients read time only through this trait, which lets tests drive
/// token lifetimes without sleeping.
pub trait Clock: Debug + Send + Sync {
    /// Monotonic instant used for expiry arithmetic.
    fn now(&self) -> Instant;

    /// Wall-clock seconds since the Unix epoch, used in request signatures.
    fn unix_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// Clock shared between an auth client and its owner.
pub type SharedClock = Arc<dyn Clock>;

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) use self::manual::ManualClock;

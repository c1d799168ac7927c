//! Time source used for token expiry computation
//!
//! The `Authenticator` never calls `SystemTime::now()` directly. Tests pin
//! the clock with `FixedClock` so expiry assertions are exact.

use std::fmt;
use std::time::SystemTime;

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> SystemTime;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SystemTime);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn fixed_clock_never_moves() {
        let instant = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now() > UNIX_EPOCH);
    }
}

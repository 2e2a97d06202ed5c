//! Time source used for token expiry checks.

use chrono::{DateTime, Utc};

/// A source of the current time.
///
/// The token manager reads time only through this trait, so expiry can be
/// driven from tests without sleeping.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

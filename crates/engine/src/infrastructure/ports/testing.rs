//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of the game's intentional non-determinism (random character
/// selection, the resolver's last-resort pick).
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn gen_index(&self, len: usize) -> usize;
}

//! The clock seam: real sleeping in production, recorded sleeping in tests.
//!
//! # Design
//!
//! Travel between two waypoints is simulated by *really blocking* the flight
//! thread for the timestamp delta; the one thing worth abstracting is the
//! sleep itself.  Production code wires
//! [`SystemClock`]; tests wire [`VirtualClock`], which records every
//! requested delay and returns immediately, making multi-waypoint flights
//! deterministic and instant.
//!
//! Nothing here reads wall-clock *now*: cutoff decisions compare waypoint
//! timestamps against the configured cutoff instant, both of which live in
//! simulated time.

use std::sync::Mutex;
use std::time::Duration;

/// Sleep capability injected into every drone.
///
/// `Send + Sync` because one clock instance is shared by all flight threads.
pub trait Clock: Send + Sync {
    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The production clock: a plain blocking [`std::thread::sleep`].
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock for tests: records each requested sleep and returns immediately.
#[derive(Default)]
pub struct VirtualClock {
    slept: Mutex<Vec<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delay requested so far, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        // A poisoned lock still holds valid data; recover it rather than
        // cascade a panic out of an assertion helper.
        self.slept
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Sum of all requested delays.
    pub fn total_slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Clock for VirtualClock {
    fn sleep(&self, duration: Duration) {
        self.slept
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
    }
}

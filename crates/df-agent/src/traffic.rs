//! Traffic classification for sighted stations.
//!
//! Real congestion data is out of scope; the stock classifier draws a
//! level at random from a per-drone seeded generator so runs are
//! reproducible for a given fleet.

use df_core::{DroneId, Station, TrafficLevel};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Sighting radius around a waypoint, in kilometres.
pub const MAX_VISIBILITY_KM: f64 = 0.35;

/// Assigns a congestion level to a sighted station.
///
/// Takes `&mut self` so implementations can carry generator state.
pub trait TrafficClassifier: Send {
    fn classify(&mut self, station: &Station) -> TrafficLevel;
}

// ── SeededClassifier ────────────────────────────────────────────────────────

/// Splitmix-style multiplier; spreads consecutive drone ids across the
/// seed space so sibling drones do not report in lockstep.
const SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Draws a uniform random [`TrafficLevel`] per sighting.
pub struct SeededClassifier {
    rng: SmallRng,
}

impl SeededClassifier {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Classifier seeded from the drone's own id.
    pub fn for_drone(id: DroneId) -> Self {
        Self::new(u64::from(id.0).wrapping_mul(SEED_MIX))
    }
}

impl TrafficClassifier for SeededClassifier {
    fn classify(&mut self, _station: &Station) -> TrafficLevel {
        TrafficLevel::ALL[self.rng.gen_range(0..TrafficLevel::ALL.len())]
    }
}

// ── FixedClassifier ─────────────────────────────────────────────────────────

/// Always reports the same level. Handy in tests asserting on events.
pub struct FixedClassifier(pub TrafficLevel);

impl TrafficClassifier for FixedClassifier {
    fn classify(&mut self, _station: &Station) -> TrafficLevel {
        self.0
    }
}

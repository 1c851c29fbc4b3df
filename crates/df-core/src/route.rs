//! Timestamped waypoints and the non-empty `Route` wrapper.
//!
//! # Route invariants
//!
//! A route is an **ordered, non-empty** waypoint sequence; the first
//! waypoint is the flight's origin.  [`Route::from_waypoints`] refuses an
//! empty vector, so downstream code can take `origin()` without a bounds
//! check.  Timestamps are assumed non-decreasing; a violating pair is
//! tolerated at flight time by clamping the travel delay to zero (see
//! [`Waypoint::travel_time_to`]).
//!
//! Once resolved, a route is never mutated.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::GeoPoint;

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A timestamped position on a drone's route.
///
/// `Waypoint` is `Copy` and compared by value: a movement primitive that
/// returns its input waypoint unchanged is how a stall is signalled, so
/// equality carries semantic weight here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub position: GeoPoint,
    pub time:     DateTime<Utc>,
}

impl Waypoint {
    #[inline]
    pub fn new(lat: f64, lon: f64, time: DateTime<Utc>) -> Self {
        Self { position: GeoPoint::new(lat, lon), time }
    }

    /// Simulated travel delay from this waypoint to `next`.
    ///
    /// A zero **or negative** timestamp delta yields `Duration::ZERO`, an
    /// immediate transition.  Out-of-order timestamps are bad data, not a
    /// reason to abort a flight.
    pub fn travel_time_to(&self, next: &Waypoint) -> Duration {
        (next.time - self.time).to_std().unwrap_or(Duration::ZERO)
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.position, self.time.format("%H:%M:%S"))
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The full ordered waypoint sequence for one drone.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    /// Wrap a waypoint sequence, refusing an empty one.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Option<Route> {
        if waypoints.is_empty() {
            None
        } else {
            Some(Route { waypoints })
        }
    }

    /// The first waypoint, where the flight lifts off.
    #[inline]
    pub fn origin(&self) -> Waypoint {
        self.waypoints[0]
    }

    /// Every waypoint after the origin, in flight order.
    ///
    /// The dispatcher iterates this, never the origin itself: a leg is
    /// always a transition *between* two waypoints.
    #[inline]
    pub fn onward(&self) -> &[Waypoint] {
        &self.waypoints[1..]
    }

    /// The final waypoint.  Equals the origin for a single-point route.
    #[inline]
    pub fn last(&self) -> Waypoint {
        self.waypoints[self.waypoints.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`; routes are non-empty by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

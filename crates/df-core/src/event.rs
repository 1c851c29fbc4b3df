//! Flight events and the sink they flow through.
//!
//! # Design
//!
//! Every observable moment of a flight (power transitions, legs flown,
//! stalls, restarts, station sightings, cutoff) is a [`FlightEvent`] value
//! handed to an injected [`EventSink`].  Drones and dispatchers never touch
//! a logging framework directly, so tests capture events with
//! [`CollectingSink`] and assert on them as plain data.
//!
//! [`TracingSink`] is the production default: it renders each event as a
//! structured `tracing` statement.  `tracing` without a subscriber is a
//! no-op, so the default costs nothing in library use.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::{DroneId, Waypoint};

// ── Classification labels ─────────────────────────────────────────────────────

/// Severity label attached to a station sighting.
///
/// Cosmetic only: the label never influences the traffic-report counter or
/// any control decision.  The classifier producing it is injectable so tests
/// can pin it down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrafficLevel {
    Heavy,
    Light,
    Moderate,
}

impl TrafficLevel {
    /// All labels, in the order the seeded classifier samples them.
    pub const ALL: [TrafficLevel; 3] =
        [TrafficLevel::Heavy, TrafficLevel::Light, TrafficLevel::Moderate];
}

impl std::fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrafficLevel::Heavy => "HEAVY",
            TrafficLevel::Light => "LIGHT",
            TrafficLevel::Moderate => "MODERATE",
        })
    }
}

/// Why a movement request left the drone where it was.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// The drone was powered off before the move was attempted.
    PoweredOff,
    /// The traffic-report counter reached its limit; the drone powered
    /// itself off instead of moving.
    MemoryExhausted,
}

impl std::fmt::Display for StallCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StallCause::PoweredOff => "powered off",
            StallCause::MemoryExhausted => "out of traffic memory",
        })
    }
}

// ── FlightEvent ───────────────────────────────────────────────────────────────

/// One observable moment in a drone's flight.
#[derive(Clone, Debug, PartialEq)]
pub enum FlightEvent {
    /// `start()` ran: power on, traffic memory wiped.
    PoweredOn { drone: DroneId },
    /// `shut_down()` ran.  Emitted on every call, including redundant ones.
    PoweredOff { drone: DroneId },
    /// The dispatcher started a flight at the route's origin.
    LiftedOff { drone: DroneId, origin: Waypoint },
    /// A leg is being flown (emitted before the simulated travel wait).
    Flying {
        drone: DroneId,
        from:  Waypoint,
        to:    Waypoint,
    },
    /// A movement request returned its input unchanged.
    Stalled {
        drone: DroneId,
        at:    Waypoint,
        cause: StallCause,
    },
    /// The dispatcher is about to perform its single scripted restart.
    RestartAttempted { drone: DroneId },
    /// The post-restart retry reached the intended waypoint.
    Recovered { drone: DroneId, at: Waypoint },
    /// The post-restart retry still fell short; the flight is over.
    RestartFailed { drone: DroneId, at: Waypoint },
    /// A station lies within visibility of the waypoint just reached.
    StationSighted {
        drone:     DroneId,
        station:   String,
        at:        Waypoint,
        speed_kph: f64,
        traffic:   TrafficLevel,
    },
    /// The global cutoff precedes the next waypoint; the flight ends early.
    CutoffReached {
        drone:  DroneId,
        cutoff: DateTime<Utc>,
        next:   Waypoint,
    },
    /// The route for this drone could not be resolved; no movement happened.
    RouteUnavailable { drone: DroneId },
    /// Every waypoint was reached.
    FlightCompleted { drone: DroneId, end: Waypoint },
}

impl FlightEvent {
    /// The drone this event belongs to.
    pub fn drone(&self) -> DroneId {
        match *self {
            FlightEvent::PoweredOn { drone }
            | FlightEvent::PoweredOff { drone }
            | FlightEvent::LiftedOff { drone, .. }
            | FlightEvent::Flying { drone, .. }
            | FlightEvent::Stalled { drone, .. }
            | FlightEvent::RestartAttempted { drone }
            | FlightEvent::Recovered { drone, .. }
            | FlightEvent::RestartFailed { drone, .. }
            | FlightEvent::StationSighted { drone, .. }
            | FlightEvent::CutoffReached { drone, .. }
            | FlightEvent::RouteUnavailable { drone }
            | FlightEvent::FlightCompleted { drone, .. } => drone,
        }
    }
}

// ── EventSink ─────────────────────────────────────────────────────────────────

/// Destination for flight events.
///
/// `Send + Sync` because one sink is typically shared (`Arc`) by every
/// flight thread; `record` takes `&self` so implementations manage their own
/// interior mutability.
pub trait EventSink: Send + Sync {
    fn record(&self, event: FlightEvent);
}

/// An [`EventSink`] that discards everything.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: FlightEvent) {}
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// The production sink: renders events as structured `tracing` statements.
///
/// The drone id rides on every line, waypoint times render as `%H:%M:%S`,
/// and sightings carry station name, speed, and severity.  Stalls and
/// aborted flights log at ERROR, everything else at INFO.
#[derive(Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: FlightEvent) {
        use tracing::{error, info};

        match event {
            FlightEvent::PoweredOn { drone } => info!(%drone, "powered on"),
            FlightEvent::PoweredOff { drone } => info!(%drone, "powered off"),
            FlightEvent::LiftedOff { drone, origin } => {
                info!(%drone, at = %origin, "lifted off");
            }
            FlightEvent::Flying { drone, from, to } => {
                info!(
                    %drone,
                    time = %from.time.format("%H:%M:%S"),
                    to = %to.position,
                    "flying",
                );
            }
            FlightEvent::Stalled { drone, at, cause } => {
                error!(%drone, time = %at.time.format("%H:%M:%S"), "stalled: {cause}");
            }
            FlightEvent::RestartAttempted { drone } => info!(%drone, "trying to restart"),
            FlightEvent::Recovered { drone, at } => {
                info!(%drone, %at, "restart succeeded");
            }
            FlightEvent::RestartFailed { drone, at } => {
                error!(%drone, %at, "restart failed, aborting");
            }
            FlightEvent::StationSighted { drone, station, at, speed_kph, traffic } => {
                info!(
                    %drone,
                    %station,
                    time = %at.time.format("%H:%M:%S"),
                    speed = format_args!("{speed_kph:.3} km/h"),
                    traffic = %traffic,
                    "station in sight",
                );
            }
            FlightEvent::CutoffReached { drone, cutoff, next } => {
                info!(%drone, %cutoff, %next, "shutdown time reached, ending flight");
            }
            FlightEvent::RouteUnavailable { drone } => {
                error!(%drone, "could not resolve route, aborting");
            }
            FlightEvent::FlightCompleted { drone, end } => {
                info!(%drone, position = %end.position, "route complete");
            }
        }
    }
}

// ── CollectingSink ────────────────────────────────────────────────────────────

/// A sink for tests: buffers every event behind a mutex.
///
/// Share one `Arc<CollectingSink>` between the code under test and the
/// assertions, then [`take`][Self::take] the buffer.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<FlightEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<FlightEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Copy of the buffer without draining it.
    pub fn snapshot(&self) -> Vec<FlightEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EventSink for CollectingSink {
    fn record(&self, event: FlightEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

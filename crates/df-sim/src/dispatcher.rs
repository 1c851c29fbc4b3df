//! The dispatcher: one flight, start to shutdown.
//!
//! # Flight lifecycle
//!
//! 1. Load the route; an unloadable route aborts the flight.
//! 2. Start the drone and lift off at the route's origin.
//! 3. For each onward waypoint:
//!    - halt if its scheduled time has reached the cutoff,
//!    - fly the leg; on a stall, restart the drone and retry the leg
//!      once, aborting if the retry stalls too.
//! 4. Shut the drone down, whatever the exit path was.
//!
//! A stall is detected by position: [`DroneControl::fly_to`] hands back
//! the departure waypoint instead of the destination.  Restarting wipes
//! the drone's report memory, so a memory-exhausted drone resumes its
//! route with a clean slate.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use df_agent::DroneControl;
use df_core::{EventSink, FlightEvent, TracingSink};
use df_store::RouteProvider;

// ── FlightOutcome ───────────────────────────────────────────────────────────

/// How a flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// Every onward leg was flown.
    Completed,
    /// The route could not be loaded.
    RouteUnavailable,
    /// A leg stalled and the restart retry stalled too.
    RecoveryFailed,
    /// The next leg's scheduled time had reached the fleet cutoff.
    CutoffReached,
}

impl FlightOutcome {
    /// Whether the flight ended abnormally.  Reaching the cutoff is a
    /// scheduled end of day, not a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, FlightOutcome::RouteUnavailable | FlightOutcome::RecoveryFailed)
    }
}

// ── Dispatcher ──────────────────────────────────────────────────────────────

/// Flies drones along routes pulled from a [`RouteProvider`].
///
/// One dispatcher serves a whole fleet; [`fly`](Dispatcher::fly) holds
/// no per-flight state between calls.
pub struct Dispatcher<R: RouteProvider> {
    routes: R,
    cutoff: Option<DateTime<Utc>>,
    events: Arc<dyn EventSink>,
}

impl<R: RouteProvider> Dispatcher<R> {
    pub fn new(routes: R) -> Self {
        Self { routes, cutoff: None, events: Arc::new(TracingSink) }
    }

    /// Halt every flight before legs scheduled at or after `cutoff`.
    pub fn cutoff(mut self, cutoff: DateTime<Utc>) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Sink receiving the dispatcher's own events.
    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Fly `drone` along its stored route.
    ///
    /// The drone is shut down before this returns, on every exit path.
    pub fn fly(&self, drone: &mut dyn DroneControl) -> FlightOutcome {
        let outcome = self.fly_route(drone);
        drone.shut_down();
        outcome
    }

    fn fly_route(&self, drone: &mut dyn DroneControl) -> FlightOutcome {
        let id = drone.id();
        let route = match self.routes.route(id) {
            Ok(route) => route,
            Err(_) => {
                self.events.record(FlightEvent::RouteUnavailable { drone: id });
                return FlightOutcome::RouteUnavailable;
            }
        };

        drone.start();
        let mut current = route.origin();
        self.events.record(FlightEvent::LiftedOff { drone: id, origin: current });

        for &next in route.onward() {
            if let Some(cutoff) = self.cutoff {
                if next.time >= cutoff {
                    self.events.record(FlightEvent::CutoffReached { drone: id, cutoff, next });
                    return FlightOutcome::CutoffReached;
                }
            }

            let mut reached = drone.fly_to(current, next);
            if reached == current {
                self.events.record(FlightEvent::RestartAttempted { drone: id });
                drone.start();
                reached = drone.fly_to(current, next);
                if reached != next {
                    self.events.record(FlightEvent::RestartFailed { drone: id, at: current });
                    return FlightOutcome::RecoveryFailed;
                }
                self.events.record(FlightEvent::Recovered { drone: id, at: reached });
            }
            current = reached;
        }

        self.events.record(FlightEvent::FlightCompleted { drone: id, end: current });
        FlightOutcome::Completed
    }
}

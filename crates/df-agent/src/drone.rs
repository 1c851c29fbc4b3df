//! The drone state machine.
//!
//! A drone is either powered on or off. While on, it can fly a single
//! hop between two waypoints, after which it scans for tube stations
//! within visibility range and files one traffic report per sighting.
//! Reports accumulate in a fixed-capacity memory; once the memory is
//! full the next hop attempt stalls the drone and powers it down, and
//! it stays put until something restarts it.

use std::sync::Arc;

use df_core::{
    Clock, DroneId, EventSink, FlightEvent, StallCause, Station, SystemClock, TracingSink,
    Waypoint,
};

use crate::speed::speed_kph;
use crate::traffic::{SeededClassifier, TrafficClassifier, MAX_VISIBILITY_KM};

/// Reports a drone can hold before its memory is exhausted.
pub const MAX_TRAFFIC_REPORTS: u32 = 10;

// ── Power ───────────────────────────────────────────────────────────────────

/// Power state of a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    Off,
    On,
}

// ── DroneControl ────────────────────────────────────────────────────────────

/// The control surface a dispatcher needs from a drone.
///
/// [`Drone`] is the stock implementation; tests substitute scripted
/// stand-ins to drive the dispatcher through failure paths the real
/// unit cannot produce on demand.
pub trait DroneControl: Send {
    /// Identity of the unit.
    fn id(&self) -> DroneId;

    /// Power the drone on and wipe its report memory.
    fn start(&mut self);

    /// Power the drone off.
    fn shut_down(&mut self);

    /// Attempt one hop from `current` to `next`.
    ///
    /// Returns the waypoint the drone actually occupies afterwards:
    /// `next` when the hop was flown, `current` when the drone stalled.
    fn fly_to(&mut self, current: Waypoint, next: Waypoint) -> Waypoint;
}

// ── Drone ───────────────────────────────────────────────────────────────────

/// A powered unit that flies waypoint hops and reports station traffic.
///
/// Construct with [`DroneBuilder`]; a fresh drone is powered off with
/// an empty report memory.
pub struct Drone {
    id:              DroneId,
    power:           Power,
    traffic_reports: u32,
    stations:        Arc<[Station]>,
    classifier:      Box<dyn TrafficClassifier>,
    clock:           Arc<dyn Clock>,
    events:          Arc<dyn EventSink>,
}

impl Drone {
    /// Shorthand for `DroneBuilder::new(id).build()`.
    pub fn new(id: impl Into<DroneId>) -> Self {
        DroneBuilder::new(id).build()
    }

    /// Whether the drone is currently powered on.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.power == Power::On
    }

    /// Traffic reports currently held in memory.
    #[inline]
    pub fn traffic_reports(&self) -> u32 {
        self.traffic_reports
    }

    /// Scan for stations visible from `at` and file one report each.
    ///
    /// The scan never stops early: a single hop past a cluster of
    /// stations may push the memory past capacity, and the overflow is
    /// only acted on at the next hop attempt.
    fn scan_stations(&mut self, at: Waypoint, speed_kph: f64) {
        let stations = Arc::clone(&self.stations);
        for station in stations.iter() {
            if at.position.distance_km(station.position) > MAX_VISIBILITY_KM {
                continue;
            }
            self.traffic_reports += 1;
            let traffic = self.classifier.classify(station);
            self.events.record(FlightEvent::StationSighted {
                drone:     self.id,
                station:   station.name.clone(),
                at,
                speed_kph,
                traffic,
            });
        }
    }
}

impl DroneControl for Drone {
    #[inline]
    fn id(&self) -> DroneId {
        self.id
    }

    fn start(&mut self) {
        self.traffic_reports = 0;
        self.power = Power::On;
        self.events.record(FlightEvent::PoweredOn { drone: self.id });
    }

    fn shut_down(&mut self) {
        self.power = Power::Off;
        self.events.record(FlightEvent::PoweredOff { drone: self.id });
    }

    fn fly_to(&mut self, current: Waypoint, next: Waypoint) -> Waypoint {
        if self.power == Power::Off {
            self.events.record(FlightEvent::Stalled {
                drone: self.id,
                at:    current,
                cause: StallCause::PoweredOff,
            });
            return current;
        }
        if self.traffic_reports >= MAX_TRAFFIC_REPORTS {
            self.events.record(FlightEvent::Stalled {
                drone: self.id,
                at:    current,
                cause: StallCause::MemoryExhausted,
            });
            self.shut_down();
            return current;
        }

        self.events.record(FlightEvent::Flying {
            drone: self.id,
            from:  current,
            to:    next,
        });

        let travel = current.travel_time_to(&next);
        self.clock.sleep(travel);

        let speed = speed_kph(current.position, next.position, travel);
        self.scan_stations(next, speed);
        next
    }
}

// ── DroneBuilder ────────────────────────────────────────────────────────────

/// Fluent construction of a [`Drone`].
///
/// Every knob has a default: no visible stations, a per-drone seeded
/// classifier, the system clock, and tracing-backed event output.
pub struct DroneBuilder {
    id:         DroneId,
    stations:   Arc<[Station]>,
    classifier: Option<Box<dyn TrafficClassifier>>,
    clock:      Option<Arc<dyn Clock>>,
    events:     Option<Arc<dyn EventSink>>,
}

impl DroneBuilder {
    pub fn new(id: impl Into<DroneId>) -> Self {
        Self {
            id:         id.into(),
            stations:   Vec::new().into(),
            classifier: None,
            clock:      None,
            events:     None,
        }
    }

    /// Stations the drone can sight while flying.
    pub fn stations(mut self, stations: Arc<[Station]>) -> Self {
        self.stations = stations;
        self
    }

    /// Replace the default per-drone seeded traffic classifier.
    pub fn classifier(mut self, classifier: impl TrafficClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Clock used to pace hops. Tests swap in a virtual clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sink receiving every event the drone emits.
    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Drone {
        let classifier = self
            .classifier
            .unwrap_or_else(|| Box::new(SeededClassifier::for_drone(self.id)));
        Drone {
            id: self.id,
            power: Power::Off,
            traffic_reports: 0,
            stations: self.stations,
            classifier,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            events: self.events.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }
}

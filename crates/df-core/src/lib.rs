//! Foundational types for the `dronefleet` simulator.
//!
//! This crate is a dependency of every other `df-*` crate.  It intentionally
//! has no `df-*` dependencies and minimal external ones (only `chrono` for
//! waypoint timestamps and `tracing` for the default event sink).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `DroneId`                                             |
//! | [`geo`]       | `GeoPoint`, haversine distance                        |
//! | [`route`]     | `Waypoint`, `Route` (non-empty waypoint sequence)     |
//! | [`station`]   | `Station`                                             |
//! | [`time`]      | `Clock` trait, `SystemClock`, `VirtualClock`          |
//! | [`event`]     | `FlightEvent`, `EventSink` and its stock sinks        |

pub mod event;
pub mod geo;
pub mod ids;
pub mod route;
pub mod station;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use event::{
    CollectingSink, EventSink, FlightEvent, NoopSink, StallCause, TracingSink, TrafficLevel,
};
pub use geo::GeoPoint;
pub use ids::DroneId;
pub use route::{Route, Waypoint};
pub use station::Station;
pub use time::{Clock, SystemClock, VirtualClock};

//! Drone agents for the dronefleet simulator.
//!
//! A [`Drone`] is a powered unit that follows waypoints one hop at a
//! time, scanning for nearby tube stations after every hop and holding
//! the resulting traffic reports in a small fixed-capacity memory.
//!
//! | Module    | Contents                                            |
//! |-----------|-----------------------------------------------------|
//! | `drone`   | [`Drone`], [`DroneBuilder`], the [`DroneControl`] seam |
//! | `traffic` | [`TrafficClassifier`] and its stock implementations |
//! | `speed`   | Ground-speed estimation between two fixes           |

pub mod drone;
pub mod speed;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use drone::{Drone, DroneBuilder, DroneControl, Power, MAX_TRAFFIC_REPORTS};
pub use speed::speed_kph;
pub use traffic::{FixedClassifier, SeededClassifier, TrafficClassifier, MAX_VISIBILITY_KM};

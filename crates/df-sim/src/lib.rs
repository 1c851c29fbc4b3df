//! Flight orchestration for the dronefleet simulator.
//!
//! The [`Dispatcher`] flies one drone along its stored route, handling
//! stalls, restarts, and the fleet-wide cutoff.  The [`Fleet`] gives
//! every drone its own thread and collects a [`FlightReport`] per
//! flight once all of them land.
//!
//! | Module       | Contents                                  |
//! |--------------|-------------------------------------------|
//! | `dispatcher` | [`Dispatcher`], [`FlightOutcome`]         |
//! | `fleet`      | [`Fleet`], [`FlightReport`]               |

pub mod dispatcher;
pub mod fleet;


pub use dispatcher::{Dispatcher, FlightOutcome};
pub use fleet::{Fleet, FlightReport};

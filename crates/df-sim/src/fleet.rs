//! Fleet orchestration: one thread per flight.
//!
//! Flights block their thread for real travel time, so each drone gets
//! a dedicated `std::thread` rather than a slot in a worker pool.
//! [`Fleet::run`] joins them all and returns one report per landed
//! flight; a flight whose thread panicked is logged and omitted rather
//! than taking the fleet down.

use std::sync::Arc;
use std::thread;

use tracing::error;

use df_agent::DroneControl;
use df_store::RouteProvider;

use crate::dispatcher::{Dispatcher, FlightOutcome};

/// The end state of one flight, with its drone handed back for
/// inspection.
#[derive(Debug)]
pub struct FlightReport<D> {
    pub drone:   D,
    pub outcome: FlightOutcome,
}

/// A set of drones flown concurrently by one [`Dispatcher`].
pub struct Fleet<D, R: RouteProvider> {
    dispatcher: Arc<Dispatcher<R>>,
    drones:     Vec<D>,
}

impl<D, R> Fleet<D, R>
where
    D: DroneControl + 'static,
    R: RouteProvider + 'static,
{
    pub fn new(dispatcher: Dispatcher<R>) -> Self {
        Self { dispatcher: Arc::new(dispatcher), drones: Vec::new() }
    }

    /// Enrol a drone for the next [`run`](Fleet::run).
    pub fn add(&mut self, drone: D) {
        self.drones.push(drone);
    }

    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    /// Fly every enrolled drone to completion and collect the reports,
    /// in enrolment order.
    pub fn run(self) -> Vec<FlightReport<D>> {
        let mut handles = Vec::with_capacity(self.drones.len());
        for mut drone in self.drones {
            let dispatcher = Arc::clone(&self.dispatcher);
            handles.push(thread::spawn(move || {
                let outcome = dispatcher.fly(&mut drone);
                FlightReport { drone, outcome }
            }));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => error!("flight thread panicked, report dropped"),
            }
        }
        reports
    }
}

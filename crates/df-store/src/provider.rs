//! Provider traits and in-memory backends.

use df_core::{DroneId, Route, Station};
use rustc_hash::FxHashMap;

use crate::error::{StoreError, StoreResult};

/// Source of flight routes, keyed by drone.
///
/// `Send + Sync` because one provider instance serves every flight
/// thread in a fleet.
pub trait RouteProvider: Send + Sync {
    fn route(&self, drone: DroneId) -> StoreResult<Route>;
}

/// Source of the station list drones scan against.
pub trait StationProvider: Send + Sync {
    fn stations(&self) -> StoreResult<Vec<Station>>;
}

// ── MemoryRoutes ────────────────────────────────────────────────────────────

/// Routes held in a map.  The backend for tests and embedders that build
/// routes programmatically.
#[derive(Default)]
pub struct MemoryRoutes {
    routes: FxHashMap<DroneId, Route>,
}

impl MemoryRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, drone: impl Into<DroneId>, route: Route) {
        self.routes.insert(drone.into(), route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteProvider for MemoryRoutes {
    fn route(&self, drone: DroneId) -> StoreResult<Route> {
        self.routes
            .get(&drone)
            .cloned()
            .ok_or(StoreError::UnknownDrone(drone))
    }
}

// ── MemoryStations ──────────────────────────────────────────────────────────

/// A fixed station list.
#[derive(Default)]
pub struct MemoryStations {
    stations: Vec<Station>,
}

impl MemoryStations {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }
}

impl StationProvider for MemoryStations {
    fn stations(&self) -> StoreResult<Vec<Station>> {
        Ok(self.stations.clone())
    }
}
